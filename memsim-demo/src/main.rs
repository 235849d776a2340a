use std::env;

use log::info;
use memsim::Engine;

fn print_blocks(blocks: &[memsim::MemoryBlock]) {
    let map: String = blocks
        .iter()
        .map(|b| if b.is_free() { '.' } else { '#' })
        .collect();

    for row in map.as_bytes().chunks(50) {
        println!("  {}", String::from_utf8_lossy(row));
    }
}

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let strategy = args.next().unwrap_or_else(|| "first".to_owned());
    let policy = args.next().unwrap_or_else(|| "fifo".to_owned());

    info!("demo: strategy={} policy={}", strategy, policy);

    let engine = Engine::new();

    for size in [10, 25, 5] {
        let outcome = engine.allocate(size, &strategy);
        println!("allocate({}, {}): {} (block {:?})", size, strategy, outcome.message, outcome.block_id);
    }

    let outcome = engine.deallocate(12);
    println!("deallocate(12): {}", outcome.message);
    print_blocks(&outcome.memory_blocks);

    let outcome = engine.allocate(1, &strategy);
    println!("allocate(1, {}): {} (block {:?})", strategy, outcome.message, outcome.block_id);

    dbg!(engine.statistics());

    let outcome = engine.garbage_collect();
    println!("gc run #{}: collected {} blocks", outcome.gc_run_count, outcome.collected_count);
    print_blocks(&outcome.memory_blocks);

    let outcome = engine.simulate_page_replacement(&policy);
    println!(
        "{}: {} faults, {} hits, {}% hit ratio",
        outcome.policy, outcome.fault_count, outcome.hit_count, outcome.hit_ratio_percent
    );
    let pages: Vec<i32> = outcome.frames.iter().map(|f| f.page_number()).collect();
    println!("  frames: {:?}", pages);

    for (name, size) in [("editor", 20), ("Process-4", 8)] {
        let outcome = engine.create_process(name, size);
        println!("create_process({}, {}): {}", name, size, outcome.message);
    }
    dbg!(engine.processes());

    println!("{}", engine.swap_out("Process-1"));
    println!("{}", engine.swap_in("Process-4"));
    println!("{}", engine.swap_in("ghost"));
    println!("RAM:  {:?}", engine.list_resident());
    println!("swap: {:?}", engine.list_swapped());

    let outcome = engine.reset();
    println!("{}", outcome.message);
    dbg!(outcome.stats);
}

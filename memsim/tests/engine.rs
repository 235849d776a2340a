use std::sync::Arc;
use std::thread;

use memsim::Engine;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Engine whose table holds free runs of 3 (ids 10..13) and 10 (ids 50..60).
fn engine_with_two_holes() -> Engine {
    let engine = Engine::new();
    assert_eq!(engine.allocate(100, "first").block_id, Some(0));
    for id in (10..13).chain(50..60) {
        assert!(engine.deallocate(id).success);
    }
    engine
}

#[test]
fn first_fit_on_empty_memory() {
    let engine = Engine::new();

    let outcome = engine.allocate(5, "first");

    assert_eq!(outcome.block_id, Some(0));
    assert!(outcome.memory_blocks[..5].iter().all(|b| !b.is_free()));
    assert!(outcome.memory_blocks[5..].iter().all(|b| b.is_free()));
}

#[test]
fn best_fit_takes_zero_waste_run() {
    let engine = engine_with_two_holes();

    assert_eq!(engine.allocate(3, "best").block_id, Some(10));
}

#[test]
fn worst_fit_takes_largest_run() {
    let engine = engine_with_two_holes();

    assert_eq!(engine.allocate(3, "worst").block_id, Some(50));
}

#[test]
fn exhaustion_leaves_table_unchanged() {
    let engine = engine_with_two_holes();
    let before = engine.blocks();

    for strategy in ["first", "best", "worst"] {
        let outcome = engine.allocate(11, strategy);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "No suitable memory block found");
    }

    assert_eq!(engine.blocks(), before);
}

#[test]
fn deallocate_clears_one_block_of_a_run() {
    let engine = Engine::new();
    engine.allocate(8, "first");

    let outcome = engine.deallocate(3);

    assert!(outcome.success);
    assert_eq!(outcome.message, "Memory deallocated successfully");
    assert_eq!(outcome.stats.allocated_blocks, 7);
    assert!(outcome.memory_blocks[3].is_free());
    assert!(!outcome.memory_blocks[4].is_free());
}

#[test]
fn reset_restores_initial_statistics() {
    let engine = Engine::new();
    engine.allocate(40, "first");
    engine.allocate(7, "nope");
    engine.garbage_collect();

    let outcome = engine.reset();
    let stats = engine.statistics();

    assert!(outcome.success);
    assert_eq!(outcome.message, "Memory reset successfully");
    assert_eq!(stats.allocated_blocks, 0);
    assert_eq!(stats.free_blocks, 100);
    assert_eq!(stats.total_allocations, 0);
    assert_eq!(stats.successful_allocations, 0);
    assert_eq!(stats.gc_collections, 0);
}

#[test]
fn statistics_round_success_rate() {
    let engine = Engine::new();
    engine.allocate(10, "first");
    engine.allocate(10, "best");
    engine.allocate(500, "worst");

    let stats = engine.statistics();

    assert_eq!(stats.total_allocations, 3);
    assert_eq!(stats.successful_allocations, 2);
    assert_eq!(stats.success_rate, 67);
    assert_eq!(stats.utilization_percentage, 20);
}

#[test]
fn page_replacement_counts_are_fixed() {
    let engine = Engine::new();

    let fifo = engine.simulate_page_replacement("fifo");
    assert_eq!((fifo.fault_count, fifo.hit_count, fifo.hit_ratio_percent), (10, 10, 50));

    let lru = engine.simulate_page_replacement("lru");
    assert_eq!((lru.fault_count, lru.hit_count, lru.hit_ratio_percent), (8, 12, 60));

    let optimal = engine.simulate_page_replacement("optimal");
    assert_eq!((optimal.fault_count, optimal.hit_count), (8, 12));
    assert_eq!(optimal.frames.len(), 4);
    assert_eq!(
        optimal.frames.iter().map(|f| f.page_number()).collect::<Vec<_>>(),
        vec![1, 0, 7, 2]
    );
}

#[test]
fn unknown_policy_reports_zero_faults() {
    let engine = Engine::new();
    engine.simulate_page_replacement("FIFO");

    let outcome = engine.simulate_page_replacement("clock");

    assert_eq!(outcome.policy, "clock");
    assert_eq!(outcome.fault_count, 0);
    assert_eq!(outcome.hit_count, 20);
    assert_eq!(outcome.hit_ratio_percent, 100);
    assert!(outcome.frames.iter().all(|f| f.is_empty()));
}

#[test]
fn gc_fraction_converges_near_probability() {
    let engine = Engine::with_rng(StdRng::seed_from_u64(0x5eed));
    let trials = 1000;
    let mut allocated = 0;
    let mut collected = 0;

    for _ in 0..trials {
        engine.reset();
        engine.allocate(100, "first");
        allocated += 100;

        let outcome = engine.garbage_collect();
        assert!(outcome.collected_count <= 100);
        assert_eq!(outcome.stats.allocated_blocks, 100 - outcome.collected_count);
        collected += outcome.collected_count;
    }

    let fraction = collected as f64 / allocated as f64;
    assert!((0.28..=0.32).contains(&fraction), "fraction {}", fraction);
}

#[test]
fn swap_round_trip() {
    let engine = Engine::new();
    let resident = engine.list_resident();
    let swapped = engine.list_swapped();

    assert_eq!(
        engine.swap_out("Process-1"),
        "✅ Process Process-1 swapped out to disk successfully!"
    );
    assert!(engine.list_swapped().contains(&"Process-1".to_owned()));
    assert_eq!(
        engine.swap_in("Process-1"),
        "✅ Process Process-1 swapped in to RAM successfully!"
    );

    assert_eq!(engine.list_resident(), resident);
    assert_eq!(engine.list_swapped(), swapped);
}

#[test]
fn swap_of_unknown_process_reports_not_found() {
    let engine = Engine::new();

    assert_eq!(engine.swap_out("ghost"), "❌ Process ghost not found in RAM!");
    assert_eq!(engine.swap_in("ghost"), "❌ Process ghost not found in swap space!");
    assert_eq!(engine.list_resident().len(), 3);
    assert_eq!(engine.list_swapped().len(), 2);
}

#[test]
fn created_processes_become_resident() {
    let engine = Engine::new();

    let first = engine.create_process("compiler", 30);
    let second = engine.create_process("linker", 12);

    assert!(first.success);
    assert_eq!(first.message, "Process created and added to RAM");
    let ids: Vec<u32> = second.processes.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(engine.list_resident().contains(&"linker".to_owned()));
    assert_eq!(engine.statistics().active_processes, 2);
}

#[test]
fn failed_process_creation_consumes_an_id() {
    let engine = Engine::new();
    engine.create_process("a", 1);

    let failed = engine.create_process("Process-5", 1);
    let next = engine.create_process("b", 1);

    assert!(!failed.success);
    assert_eq!(failed.processes.len(), 1);
    assert!(!engine.list_resident().contains(&"Process-5".to_owned()));
    let ids: Vec<u32> = next.processes.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn concurrent_allocations_never_share_blocks() {
    let engine = Arc::new(Engine::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let strategy = ["first", "best", "worst"][i % 3];
            thread::spawn(move || {
                (0..50)
                    .filter(|_| engine.allocate(1, strategy).success)
                    .count()
            })
        })
        .collect();

    let succeeded: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let stats = engine.statistics();

    assert_eq!(succeeded, 100);
    assert_eq!(stats.total_allocations, 400);
    assert_eq!(stats.successful_allocations, 100);
    assert_eq!(stats.allocated_blocks, 100);
}

#[test]
fn results_serialize_with_transport_field_names() {
    let engine = Engine::new();

    let allocation = serde_json::to_value(engine.allocate(2, "first")).unwrap();
    assert_eq!(allocation["blockId"], 0);
    assert_eq!(allocation["memoryBlocks"][1]["free"], false);
    assert_eq!(allocation["stats"]["utilizationPercentage"], 2);

    let replacement = serde_json::to_value(engine.simulate_page_replacement("lru")).unwrap();
    assert_eq!(replacement["algorithm"], "lru");
    assert_eq!(replacement["pageFaults"], 8);
    assert_eq!(replacement["hitRatio"], 60);
    assert_eq!(replacement["pageFrames"][0]["frameId"], 0);

    let gc = serde_json::to_value(engine.garbage_collect()).unwrap();
    assert_eq!(gc["gcCollections"], 1);
    assert!(gc.get("objectsCollected").is_some());

    let failed = serde_json::to_value(engine.allocate(1000, "first")).unwrap();
    assert!(failed.get("blockId").is_none());
}

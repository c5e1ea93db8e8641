//! IAI-Callgrind benchmark for OrderedMap.
//!
//! Measures instruction counts for insert, lookup and removal.
//! Data sizes: 1000 (Small state) and 100000 (Large state).

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use lexicon::tree::OrderedMap;
use std::hint::black_box;

// Setup functions for different data sizes
fn setup_keys_1000() -> Vec<u32> {
    (0..1000).collect()
}

fn setup_keys_100000() -> Vec<u32> {
    (0..100_000).collect()
}

fn setup_map_1000() -> OrderedMap<u32, u32> {
    (0..1000).map(|key| (key, key)).collect()
}

fn setup_map_100000() -> OrderedMap<u32, u32> {
    (0..100_000).map(|key| (key, key)).collect()
}

// insert benchmarks
#[library_benchmark]
#[bench::with_setup(setup_keys_1000())]
fn insert_ascending_1000(keys: Vec<u32>) -> OrderedMap<u32, u32> {
    let mut map = OrderedMap::new();
    for key in black_box(keys) {
        map.insert(key, key);
    }
    black_box(map)
}

#[library_benchmark]
#[bench::with_setup(setup_keys_100000())]
fn insert_ascending_100000(keys: Vec<u32>) -> OrderedMap<u32, u32> {
    let mut map = OrderedMap::new();
    for key in black_box(keys) {
        map.insert(key, key);
    }
    black_box(map)
}

// get benchmarks
#[library_benchmark]
#[bench::with_setup(setup_map_1000())]
fn get_all_1000(map: OrderedMap<u32, u32>) -> u64 {
    let mut sum = 0_u64;
    for key in 0..1000 {
        if let Some(&value) = map.get(&black_box(key)) {
            sum += u64::from(value);
        }
    }
    black_box(sum)
}

#[library_benchmark]
#[bench::with_setup(setup_map_100000())]
fn get_all_100000(map: OrderedMap<u32, u32>) -> u64 {
    let mut sum = 0_u64;
    for key in 0..100_000 {
        if let Some(&value) = map.get(&black_box(key)) {
            sum += u64::from(value);
        }
    }
    black_box(sum)
}

// remove benchmarks
#[library_benchmark]
#[bench::with_setup(setup_map_1000())]
fn remove_all_1000(mut map: OrderedMap<u32, u32>) -> OrderedMap<u32, u32> {
    for key in 0..1000 {
        map.remove(&black_box(key));
    }
    black_box(map)
}

#[library_benchmark]
#[bench::with_setup(setup_map_100000())]
fn remove_all_100000(mut map: OrderedMap<u32, u32>) -> OrderedMap<u32, u32> {
    for key in 0..100_000 {
        map.remove(&black_box(key));
    }
    black_box(map)
}

library_benchmark_group!(
    name = ordered_map_group;
    benchmarks =
        insert_ascending_1000, insert_ascending_100000,
        get_all_1000, get_all_100000,
        remove_all_1000, remove_all_100000
);

main!(library_benchmark_groups = ordered_map_group);

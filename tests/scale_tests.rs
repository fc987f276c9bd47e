use rand::Rng;
use std::time::Instant;
use umbrasort::prelude::*;

#[test]
fn test_sort_1m() {
    let count = 1_000_000;
    println!("Generating {} random elements...", count);

    let mut rng = rand::rng();
    let mut input: Vec<Vec<u8>> = Vec::with_capacity(count);

    for _ in 0..count {
        let len = rng.random_range(4..16);
        let mut row = vec![0u8; len];
        rng.fill(&mut row[..]);
        input.push(row);
    }

    println!("Sorting {} elements...", count);
    let start = Instant::now();
    let indices = umbrasort(&input);
    let duration = start.elapsed();
    println!("Sorted 1M elements in {:?}", duration);

    assert_eq!(indices.len(), count);

    for i in 0..count - 1 {
        let a = &input[indices[i]];
        let b = &input[indices[i + 1]];
        assert!(a <= b, "Sort failed at index {}", i);
    }
}

#[test]
fn test_sort_1m_shared_prefix() {
    // The workload the prefix skip exists for: every key shares a long
    // leading run, and the discriminating bytes sit many cache windows in.
    let count = 1_000_000;
    let mut rng = rand::rng();
    let prefix = b"https://service.internal.example.com/api/v2/resource/";

    let mut input: Vec<Vec<u8>> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut row = prefix.to_vec();
        let suffix_len = rng.random_range(4..12);
        for _ in 0..suffix_len {
            row.push(rng.random_range(b'a'..=b'z'));
        }
        input.push(row);
    }

    let start = Instant::now();
    let indices = umbrasort(&input);
    println!("Sorted 1M prefixed keys in {:?}", start.elapsed());

    assert_eq!(indices.len(), count);
    for i in 0..count - 1 {
        assert!(input[indices[i]] <= input[indices[i + 1]], "index {}", i);
    }
}

#[test]
#[ignore]
fn test_sort_100m_flat() {
    // WARNING: needs several GB of RAM. Uses flat storage to keep the
    // per-key overhead at the offsets table only.
    let count = 100_000_000;
    println!("Generating {} random elements...", count);

    let mut rng = rand::rng();

    struct FlatStorage {
        data: Vec<u8>,
        offsets: Vec<usize>,
    }

    impl umbrasort::core::KeyStore for FlatStorage {
        fn key(&self, index: usize) -> &[u8] {
            let start = self.offsets[index];
            let end = if index + 1 < self.offsets.len() {
                self.offsets[index + 1]
            } else {
                self.data.len()
            };
            &self.data[start..end]
        }
        fn len(&self) -> usize {
            self.offsets.len()
        }
    }

    let mut storage = FlatStorage {
        data: vec![0u8; count * 8],
        offsets: Vec::with_capacity(count),
    };

    println!("Filling data...");
    rng.fill(&mut storage.data[..]);
    for i in 0..count {
        storage.offsets.push(i * 8);
    }

    println!("Sorting {} elements...", count);
    let start = Instant::now();
    let indices = umbrasort(&storage);
    let duration = start.elapsed();
    println!("Sorted {} elements in {:?}", count, duration);

    assert_eq!(indices.len(), count);

    // Verify sample
    for i in (0..count - 1).step_by(10_000) {
        let start_a = storage.offsets[indices[i]];
        let a = &storage.data[start_a..start_a + 8];

        let start_b = storage.offsets[indices[i + 1]];
        let b = &storage.data[start_b..start_b + 8];

        assert!(a <= b, "Sort failed at index {}", i);
    }
}

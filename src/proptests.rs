use crate::arena::NodeArena;
use crate::header;
use crate::min_heap::MinHeap;
use crate::{FrequencyTable, HuffmanCodec, HuffmanTree};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn table_of(weights: &[u32]) -> FrequencyTable {
    weights
        .iter()
        .enumerate()
        .map(|(i, &w)| (i as u8, w))
        .collect()
}

/// Cheapest total merge cost over every possible merge order. Each full
/// binary tree arises from some merge order, so this is the optimum of
/// `Σ frequency × depth`.
fn brute_force_cost(weights: &[u64]) -> u64 {
    if weights.len() < 2 {
        return 0;
    }
    let mut best = u64::MAX;
    for i in 0..weights.len() {
        for j in i + 1..weights.len() {
            let merged = weights[i] + weights[j];
            let mut rest: Vec<u64> = weights
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, &w)| w)
                .collect();
            rest.push(merged);
            best = best.min(merged + brute_force_cost(&rest));
        }
    }
    best
}

#[derive(Debug, Clone)]
enum HeapOp {
    Insert(u64),
    Extract,
}

fn heap_op() -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        2 => (0u64..1000).prop_map(HeapOp::Insert),
        1 => Just(HeapOp::Extract),
    ]
}

proptest! {
    #[test]
    fn roundtrip(data in prop::collection::vec(any::<u8>(), 1..2048)) {
        let mut codec = HuffmanCodec::new();
        let encoded = codec.encode(&data).unwrap();
        prop_assert_eq!(codec.decode(&encoded).unwrap(), data);
    }

    #[test]
    fn roundtrip_skewed(data in prop::collection::vec(prop_oneof![8 => Just(b'e'), 2 => any::<u8>()], 1..512)) {
        let mut codec = HuffmanCodec::new();
        let encoded = codec.encode(&data).unwrap();
        prop_assert_eq!(codec.decode(&encoded).unwrap(), data);
    }

    #[test]
    fn prefix_free(weights in prop::collection::vec(1u32..10_000, 1..64)) {
        let tree = HuffmanTree::from_frequencies(&table_of(&weights)).unwrap();
        let table = tree.generate_table();
        prop_assert_eq!(table.len(), weights.len());
        for (a, code_a) in table.iter() {
            prop_assert!(!code_a.is_empty());
            for (b, code_b) in table.iter() {
                if a != b {
                    prop_assert!(!code_a.is_prefix_of(code_b));
                }
            }
        }
    }

    #[test]
    fn optimal(weights in prop::collection::vec(1u32..50, 1..7)) {
        let tree = HuffmanTree::from_frequencies(&table_of(&weights)).unwrap();
        let brute: Vec<u64> = weights.iter().map(|&w| w as u64).collect();
        prop_assert_eq!(tree.weighted_path_length(), brute_force_cost(&brute));
    }

    #[test]
    fn heap_invariant(initial in prop::collection::vec(0u64..1000, 0..32), ops in prop::collection::vec(heap_op(), 0..64)) {
        let mut arena = NodeArena::new();
        let ids = initial.iter().map(|&f| arena.create_leaf(0, f)).collect();
        let mut heap = MinHeap::build(ids, &arena);
        let mut shadow = initial.clone();
        prop_assert!(heap.valid_min_heap(&arena));

        for op in ops {
            match op {
                HeapOp::Insert(f) => {
                    let id = arena.create_leaf(1, f);
                    heap.insert(id, &arena);
                    shadow.push(f);
                }
                HeapOp::Extract => {
                    let got = heap.extract_min(&arena).map(|id| arena.frequency(id));
                    let want = shadow.iter().copied().min();
                    prop_assert_eq!(got, want);
                    if let Some(w) = want {
                        let pos = shadow.iter().position(|&x| x == w).unwrap();
                        shadow.swap_remove(pos);
                    }
                }
            }
            prop_assert!(heap.valid_min_heap(&arena));
            prop_assert_eq!(heap.heap_size(), shadow.len());
            if let Some(min) = heap.peek_min() {
                prop_assert_eq!(Some(arena.frequency(min)), shadow.iter().copied().min());
            }
        }
    }

    #[test]
    fn header_roundtrip(weights in prop::collection::vec(1u32..u32::MAX, 1..256)) {
        let header = header::Header::new(table_of(&weights));
        let mut bytes = Vec::new();
        header::write_header(&mut bytes, &header).unwrap();
        let read = header::read_header(&mut bytes.as_slice()).unwrap();
        prop_assert_eq!(read, header);
    }
}

#[test]
fn large_random_inputs() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut codec = HuffmanCodec::new();
    for _ in 0..8 {
        let len = rng.gen_range(1..200_000);
        let alphabet = rng.gen_range(1..=256usize);
        let data: Vec<u8> = (0..len)
            .map(|_| {
                // squaring skews the distribution towards low symbols
                let x: f64 = rng.gen();
                ((x * x) * alphabet as f64) as u8
            })
            .collect();
        let encoded = codec.encode(&data).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), data);
    }
}

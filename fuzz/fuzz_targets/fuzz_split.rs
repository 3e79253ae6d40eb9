#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use pystring::{StringError, chunks, find, join, rfind, rsplit, split, split_whitespace};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

// 1 limit byte, 1 delimiter-length byte, 1 chunk-size byte
const HEADER: usize = 3;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

static WS_TABLE: &[u8] = b" \t\n\r\x0b\x0c";

/// Words separated by a mix of delimiters and whitespace; the raw byte layout
/// alone rarely produces a delimiter twice.
#[derive(Debug, Arbitrary)]
struct Recipe {
    delimiter: Vec<u8>,
    words: Vec<Vec<u8>>,
    separators: Vec<bool>,
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size >= HEADER && !seed.is_multiple_of(8) {
        return fuzzer_mutate(data, size, max_size);
    }

    let recipe = loop {
        let bytes: Vec<u8> = with_rng(|rng| {
            let len = rng.random_range(8..256);
            (0..len).map(|_| rng.random::<u8>()).collect()
        });
        if let Ok(recipe) = Recipe::arbitrary(&mut Unstructured::new(&bytes)) {
            break recipe;
        }
    };

    let mut delimiter = recipe.delimiter;
    delimiter.truncate(4);
    let mut out = vec![
        with_rng(|rng| rng.next_u32() as u8),
        delimiter.len() as u8,
        with_rng(|rng| rng.next_u32() as u8),
    ];
    out.extend_from_slice(&delimiter);
    for (word, use_delimiter) in recipe.words.iter().zip(recipe.separators.iter().cycle()) {
        out.extend_from_slice(word);
        if *use_delimiter {
            out.extend_from_slice(&delimiter);
        } else {
            out.push(WS_TABLE[with_rng(|rng| rng.random_range(0..WS_TABLE.len()))]);
        }
    }

    let len = out.len().min(max_size);
    data[..len].copy_from_slice(&out[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn naive_find(text: &[u8], needle: &[u8]) -> Option<usize> {
    text.windows(needle.len()).position(|window| window == needle)
}

fn naive_rfind(text: &[u8], needle: &[u8]) -> Option<usize> {
    text.windows(needle.len()).rposition(|window| window == needle)
}

fn check(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let limit = isize::from(data[0] as i8);
    let delimiter_len = usize::from(data[1] % 5).min(data.len() - HEADER);
    let chunk_size = usize::from(data[2]);
    let delimiter = &data[HEADER..HEADER + delimiter_len];
    let text = &data[HEADER + delimiter_len..];

    if !delimiter.is_empty() {
        let found = find(text, delimiter).map(|index| index.start() as usize);
        assert_eq!(found, naive_find(text, delimiter));
        let found = rfind(text, delimiter).map(|index| index.start() as usize);
        assert_eq!(found, naive_rfind(text, delimiter));
    }

    match (split(text, delimiter, limit), rsplit(text, delimiter, limit)) {
        (Ok(left), Ok(right)) => {
            assert_eq!(left.len(), right.len());
            assert_eq!(join(&left, delimiter).unwrap(), text);
            assert_eq!(join(&right, delimiter).unwrap(), text);
        }
        (Err(StringError::InvalidLimit(n)), Err(StringError::InvalidLimit(m))) => {
            assert!(n < -1 && n == m);
        }
        other => panic!("left and right split disagree: {other:?}"),
    }

    if let Ok(words) = split_whitespace(text, limit) {
        assert!(words.len() <= text.len().max(1));
    }

    match chunks(text, chunk_size) {
        Ok(pieces) => assert_eq!(join(&pieces, b"").unwrap(), text),
        Err(error) => assert_eq!((error, chunk_size), (StringError::InvalidStep, 0)),
    }
}

fuzz_target!(|data: &[u8]| check(data));

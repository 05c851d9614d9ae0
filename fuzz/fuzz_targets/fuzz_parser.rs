#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use intlist::{Parser, ParserOptions, Scanner, ScannerOptions, Value};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r\n"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed % 10 == 0 {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size.max(HEADER + 1) && prefix < max_size {
            let limit = max_size - prefix;

            prefix += append_whitespace(&mut data[prefix..], limit);
            let limit = max_size - prefix;
            let written = append_value(&mut data[prefix..], size, limit);
            if written == 0 {
                break;
            }
            prefix += written;
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 1‒8 whitespace runs to `buf` without exceeding `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let runs = rng.random_range(1..=limit.min(8));
        let mut written = 0;
        for _ in 0..runs {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

/// Append a printed tree, truncated to `limit` bytes.
fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }

    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut Unstructured::new(&bytes)) {
            break value;
        }
    };

    let printed = value.0.to_string();
    let len = printed.len().min(limit);
    data[..len].copy_from_slice(&printed.as_bytes()[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(4)? {
            0 => Value::Integer(u.arbitrary()?),
            1 => Value::Integer(u.int_in_range(0..=99)?),
            _ => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::List(elems.into_iter().map(|v| v.0).collect())
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fn parser(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    let mut scanner = Scanner::new(ScannerOptions {
        numbers_span_feeds: flags & 1 != 0,
        panic_on_error: false,
    });
    for chunk in split_into_safe_chunks(&text, split_seed) {
        if scanner.consume(chunk).is_err() {
            break;
        }
    }
    let Ok((tokens, map)) = scanner.finish_with_map() else {
        return;
    };

    let options = ParserOptions {
        panic_on_error: false,
    };
    let parsed = if flags & 2 != 0 {
        let mut parser = Parser::with_options(options);
        tokens
            .into_iter()
            .try_for_each(|token| parser.push(token))
            .and_then(|()| parser.finish())
    } else {
        Parser::with_options(options).parse(tokens)
    };

    // Every syntax error points at a real token or at the end of input.
    if let Err(err) = &parsed {
        assert!(err.clone().locate(&map).position().is_some(), "unlocated {err}");
    }

    // A tree that parsed must survive being printed and read back.
    if let Ok(root) = parsed {
        let reparsed = intlist::from_str(&root.to_string());
        assert_eq!(reparsed.as_ref(), Ok(&root), "printed form of {root:?} did not reparse");
    }
}

fuzz_target!(|data: &[u8]| parser(data));

/// Split a UTF-8 `&str` into boundary-safe chunks sized from `split_seed`.
fn split_into_safe_chunks(text: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = text.len();

    while start < len {
        let remaining = len - start;
        let mut size = (split_seed as usize % remaining) + 1;
        while start + size < len && !text.is_char_boundary(start + size) {
            size += 1;
        }
        chunks.push(&text[start..start + size]);
        start += size;
    }

    chunks
}

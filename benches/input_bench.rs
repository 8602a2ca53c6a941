use clikit::decoder::KeyDecoder;
use clikit::input::{LineEditor, LineEvent};
use clikit::color::Theme;
use clikit::test_utils::MockTerminal;
use clikit::Capabilities;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

fn key_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_decoder");
    let decoder = KeyDecoder::new(Capabilities::default());

    let keys: Vec<&[u8]> = vec![b"\x1b[A", b"\x1b[B", &[0xe0, b'P'], b"3", b"x", b"\r"];
    group.bench_function("mixed_keys", |b| {
        b.iter_batched(
            || {
                let mut term = MockTerminal::new(24, 80);
                for _ in 0..100 {
                    term.push_keys(&keys);
                }
                term
            },
            |mut term| {
                for _ in 0..keys.len() * 100 {
                    black_box(decoder.decode(&mut term).unwrap());
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn line_editing(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_editor");
    let editor = LineEditor::new(Capabilities::plain(), Theme::default());
    let mut typed = "the quick brown fox jumps over the lazy dog ".repeat(20).into_bytes();
    typed.push(b'\r');

    group.bench_function("type_line", |b| {
        b.iter_batched(
            || {
                let mut term = MockTerminal::new(24, 80);
                term.push_input(&typed);
                term
            },
            |mut term| {
                let event = editor.read_line(&mut term).unwrap();
                assert!(matches!(event, LineEvent::Line(_)));
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, key_decoding, line_editing);
criterion_main!(benches);

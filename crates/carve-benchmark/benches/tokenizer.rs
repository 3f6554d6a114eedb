use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static SOURCE: &str = "
public static int Parse(string text, out int value, ref long state) { return 0; }
public static int Parse(string text, out int value, ref long state) { return 0; }
public static int Parse(string text, out int value, ref long state) { return 0; }
public static int Parse(string text, out int value, ref long state) { return 0; }
public static int Parse(string text, out int value, ref long state) { return 0; }
public static int Parse(string text, out int value, ref long state) { return 0; }
public static int Parse(string text, out int value, ref long state) { return 0; }
public static int Parse(string text, out int value, ref long state) { return 0; }
public List<(int, string)> Items { get; set; } = new List<(int, string)>(-1);
public List<(int, string)> Items { get; set; } = new List<(int, string)>(-1);
public List<(int, string)> Items { get; set; } = new List<(int, string)>(-1);
public List<(int, string)> Items { get; set; } = new List<(int, string)>(-1);
public List<(int, string)> Items { get; set; } = new List<(int, string)>(-1);
public List<(int, string)> Items { get; set; } = new List<(int, string)>(-1);
public List<(int, string)> Items { get; set; } = new List<(int, string)>(-1);
public List<(int, string)> Items { get; set; } = new List<(int, string)>(-1);
";

static LITERALS: &str = r#"
[Token(Offset = "0x1A2B3C", Slot = 12, Scale = 1.5, Limit = 9000000000, Name = "Foo.Bar")]
[Token(Offset = "0x1A2B3C", Slot = 12, Scale = 1.5, Limit = 9000000000, Name = "Foo.Bar")]
[Token(Offset = "0x1A2B3C", Slot = 12, Scale = 1.5, Limit = 9000000000, Name = "Foo.Bar")]
[Token(Offset = "0x1A2B3C", Slot = 12, Scale = 1.5, Limit = 9000000000, Name = "Foo.Bar")]
[Token(Offset = "0x1A2B3C", Slot = 12, Scale = 1.5, Limit = 9000000000, Name = "Foo.Bar")]
[Token(Offset = "0x1A2B3C", Slot = 12, Scale = 1.5, Limit = 9000000000, Name = "Foo.Bar")]
[Token(Offset = "0x1A2B3C", Slot = 12, Scale = 1.5, Limit = 9000000000, Name = "Foo.Bar")]
[Token(Offset = "0x1A2B3C", Slot = 12, Scale = 1.5, Limit = 9000000000, Name = "Foo.Bar")]
"#;

static CANDIDATES: [(&str, &str); 2] =
    [("members", SOURCE), ("literals", LITERALS)];

fn iterate(s: &str) {
    use carve_syntax::SyntaxKind;
    use carve_tokenizer::Tokenizer;

    let mut tokenizer = Tokenizer::new(s);

    while let Ok(token) = tokenizer.next_token() {
        if token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);

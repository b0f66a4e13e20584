use chained_set::HashBucketTable;
use chained_set::snapshot::SerializableSet;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'b', long = "buckets", default_value_t = 64)]
    buckets: usize,

    #[arg(short = 'n', long = "elements", default_value_t = 1000)]
    elements: u64,

    /// Append this many duplicated elements to the saved snapshot before
    /// loading it back.
    #[arg(short = 'd', long = "duplicates", default_value_t = 0)]
    duplicates: usize,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating table with {} buckets and {} elements",
        args.buckets, args.elements
    );

    let mut table: HashBucketTable<u64> = HashBucketTable::with_capacity(args.buckets);
    let mut rejected = 0;
    for value in 0..args.elements {
        if !table.add(value.wrapping_mul(0x9E37_79B9_7F4A_7C15)) {
            rejected += 1;
        }
    }

    println!(
        "Inserted {} elements ({} rejected as masked-hash duplicates)",
        table.len(),
        rejected
    );
    table.bucket_stats().print();

    let mut set = SerializableSet::from_table(table);
    set.before_save();
    let mut saved = set.values().to_vec();
    let extra: Vec<u64> = saved.iter().copied().take(args.duplicates).collect();
    saved.extend(extra);

    let loaded: SerializableSet<u64> = SerializableSet::from_values(saved, Default::default());
    println!(
        "Reloaded snapshot: {} backing elements, {} live elements",
        loaded.backing_len(),
        loaded.len()
    );
}

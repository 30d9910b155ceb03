use ndarray::Array2;
use subsample::{cluster_with_sampling, CcfKmeans, MutationType, RawDataset, SamplingConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two clones in one sample: a clonal cluster near 1.0 and a subclone near 0.35,
    // plus a handful of copy-number pseudo-observations that sampling always keeps.
    let n_points = 2_000;
    let n_cna = 5;
    let n = n_points + n_cna;

    let ccf = Array2::from_shape_fn((n, 1), |(i, _)| {
        let jitter = ((i * 7919) % 101) as f64 / 1000.0;
        if i >= n_points {
            0.5 + jitter
        } else if i % 3 == 0 {
            0.30 + jitter
        } else {
            0.95 + jitter
        }
    });
    let mut types = vec![MutationType::Point; n_points];
    types.extend(std::iter::repeat(MutationType::CopyNumber).take(n_cna));

    let data = RawDataset::from_fractions(
        (0..n).map(|i| format!("{}", 1 + i % 22)).collect(),
        (0..n as u64).map(|i| 10_000 + i * 113).collect(),
        ccf,
        types,
    );

    let engine = CcfKmeans::new(2).with_seed(42).with_soft_assignments(true);
    let config = SamplingConfig::new(200).with_seed(7);
    let out = cluster_with_sampling(&data, &engine, &config)?;

    println!(
        "clustered {} observations (sampled: {})",
        out.result.best_assignments.len(),
        out.sampled
    );
    for notice in &out.notices {
        println!("notice: {notice}");
    }
    let summary = &out.result.summary;
    for (row, id) in summary.cluster_ids.iter().enumerate() {
        println!(
            "cluster {id}: {} members, location {:.3}",
            summary.member_counts[row],
            summary.locations[[row, 0]]
        );
    }

    Ok(())
}

use stream_tdigest::tdigest::{
    is_sorted_by_mean, parse_scale_str, scale_to_str, Cluster, DigestOptions, ScaleFamily,
    TDigest, DEFAULT_COMPRESSION,
};
use stream_tdigest::{TdError, TdResult};

#[test]
fn stream_insert_and_query() -> TdResult<()> {
    let mut td = TDigest::new(DEFAULT_COMPRESSION)?;
    assert!(td.is_empty());
    assert_eq!(td.quantile(0.5), Err(TdError::EmptyDigest));

    td.add(0.0)?;
    td.add_many([1.0, 2.0])?;
    td.insert(3.0, 1)?;

    assert_eq!(td.len(), 4);
    assert_eq!(td.total_weight(), 4);
    assert!(is_sorted_by_mean(td.clusters()));
    assert!((td.median()? - 1.5).abs() <= 1e-12);

    let qs = td.quantiles(&[0.125, 0.875])?;
    assert!((qs[0] - 0.0).abs() <= 1e-12);
    assert!((qs[1] - 3.0).abs() <= 1e-12);
    Ok(())
}

#[test]
fn builder_and_options_agree() -> TdResult<()> {
    let opts = DigestOptions {
        compression: 25.0,
        scale: ScaleFamily::Arcsine,
    };
    let a = TDigest::with_options(opts)?;
    let b = TDigest::builder()
        .compression(25.0)
        .scale(ScaleFamily::Arcsine)
        .build()?;
    let c = TDigest::builder().options(opts).build()?;
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a.options(), opts);
    assert_eq!(a.compression(), 25.0);
    assert_eq!(a.scale(), ScaleFamily::Arcsine);

    let d = TDigest::builder().build()?;
    assert_eq!(d.options(), DigestOptions::default());
    assert_eq!(d.compression(), DEFAULT_COMPRESSION);
    assert_eq!(d.scale(), ScaleFamily::Quadratic);
    Ok(())
}

#[test]
fn bad_configuration_is_rejected() {
    for c in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert_eq!(TDigest::new(c), Err(TdError::InvalidCompression), "c={c}");
    }

    let unsorted = vec![Cluster::new(2.0, 1), Cluster::new(1.0, 1)];
    assert_eq!(
        TDigest::builder().with_clusters(unsorted).build(),
        Err(TdError::UnsortedClusters { index: 1 })
    );

    let heavy = vec![Cluster::new(0.0, u64::MAX), Cluster::new(1.0, 1)];
    assert_eq!(
        TDigest::builder().with_clusters(heavy).build(),
        Err(TdError::WeightOverflow)
    );

    // `Cluster::new` refuses zero weights in debug builds; deserialized input can still carry one.
    let zero: Vec<Cluster> = serde_json::from_str(r#"[{"mean":0.0,"weight":0}]"#).unwrap();
    assert!(matches!(
        TDigest::builder().with_clusters(zero).build(),
        Err(TdError::InvalidWeight { .. })
    ));
}

#[test]
fn rejected_observations_and_probes() -> TdResult<()> {
    let mut td = TDigest::new(10.0)?;
    assert!(matches!(
        td.insert(f64::NAN, 1),
        Err(TdError::NonFiniteInput { .. })
    ));
    assert!(matches!(
        td.insert(1.0, 0),
        Err(TdError::InvalidWeight { .. })
    ));
    assert!(td.is_empty());

    td.add(1.0)?;
    assert!(matches!(
        td.quantile(f64::NAN),
        Err(TdError::NonFiniteInput { .. })
    ));
    assert!(td.quantiles(&[0.5, f64::INFINITY]).is_err());
    Ok(())
}

#[test]
fn errors_render_with_hints() {
    let msg = TdError::EmptyDigest.to_string();
    assert!(msg.contains("hint:"), "{msg}");
    let msg = TdError::UnsortedClusters { index: 3 }.to_string();
    assert!(msg.contains('3'), "{msg}");
    let boxed: Box<dyn std::error::Error> = Box::new(TdError::WeightOverflow);
    assert!(!boxed.to_string().is_empty());
}

#[test]
fn seeded_digest_continues_streaming() -> TdResult<()> {
    let mut streamed = TDigest::new(1.0)?;
    streamed.add_many([1.0, 0.0, 2.0])?;

    let mut seeded = TDigest::builder()
        .compression(1.0)
        .with_clusters(streamed.clusters().to_vec())
        .build()?;
    assert_eq!(seeded, streamed);

    for v in [3.0, 4.0] {
        streamed.add(v)?;
        seeded.add(v)?;
    }
    assert_eq!(seeded, streamed);
    Ok(())
}

#[test]
fn clusters_and_options_serialize() -> TdResult<()> {
    let mut td = TDigest::builder()
        .compression(1.0)
        .scale(ScaleFamily::Arcsine)
        .build()?;
    td.add_many([1.0, 0.0, 2.0, 3.0, 4.0])?;

    let json = serde_json::to_string(td.clusters()).unwrap();
    let clusters: Vec<Cluster> = serde_json::from_str(&json).unwrap();
    let opts: DigestOptions =
        serde_json::from_str(&serde_json::to_string(&td.options()).unwrap()).unwrap();

    let rebuilt = TDigest::builder()
        .options(opts)
        .with_clusters(clusters)
        .build()?;
    assert_eq!(rebuilt, td);
    assert_eq!(rebuilt.quantile(0.3)?, td.quantile(0.3)?);
    Ok(())
}

#[test]
fn scale_names_parse_and_print() {
    for s in [ScaleFamily::Quadratic, ScaleFamily::Arcsine] {
        assert_eq!(parse_scale_str(Some(scale_to_str(s))).unwrap(), s);
    }
    assert_eq!(parse_scale_str(None).unwrap(), ScaleFamily::Quadratic);
    assert_eq!(parse_scale_str(Some(" ARC-SINE ")).unwrap(), ScaleFamily::Arcsine);
    assert!(parse_scale_str(Some("k3")).is_err());
}

#[test]
fn digest_is_thread_safe_value() {
    fn assert_send_sync<T: Send + Sync + Clone + 'static>() {}
    assert_send_sync::<TDigest>();
    assert_send_sync::<TdError>();

    let mut td = TDigest::new(50.0).unwrap();
    td.add_many((0..1_000).map(f64::from)).unwrap();
    let handle = std::thread::spawn(move || td.median().unwrap());
    let m = handle.join().unwrap();
    assert!((m - 499.5).abs() <= 5.0, "median={m}");
}

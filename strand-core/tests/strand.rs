//! Tests for the `Strand` orchestration API.

mod common;

use common::{reference_layout, two_pairs};
use rstest::{fixture, rstest};
use strand_core::{ExecutionStrategy, Point, PointStore, StrandBuilder, StrandError};
use strand_test_support::tracing::RecordingLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[fixture]
fn reference() -> PointStore {
    reference_layout()
}

#[rstest]
fn builder_defaults() {
    let builder = StrandBuilder::new();
    assert_eq!(builder.connections(), 1000);
    assert_eq!(builder.top_k(), 3);
    assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);

    let strand = builder.clone().build().expect("defaults valid");
    assert_eq!(strand.connections(), 1000);
    assert_eq!(strand.top_k().get(), 3);
    assert_eq!(strand.execution_strategy(), ExecutionStrategy::Auto);
}

#[rstest]
fn builder_rejects_zero_top_k() {
    let err = StrandBuilder::new()
        .with_top_k(0)
        .build()
        .expect_err("builder must reject zero top_k");
    assert!(matches!(err, StrandError::InvalidTopK { got: 0 }));
}

#[cfg(not(feature = "parallel"))]
#[rstest]
fn builder_rejects_parallel_without_feature() {
    let err = StrandBuilder::new()
        .with_execution_strategy(ExecutionStrategy::Parallel)
        .build()
        .expect_err("builder must reject parallel execution when the feature is disabled");
    assert!(matches!(
        err,
        StrandError::BackendUnavailable {
            requested: ExecutionStrategy::Parallel,
        }
    ));
}

#[cfg(feature = "parallel")]
#[rstest]
fn builder_accepts_parallel_with_feature() {
    let strand = StrandBuilder::new()
        .with_execution_strategy(ExecutionStrategy::Parallel)
        .build()
        .expect("parallel is compiled in");
    assert!(strand.execution_strategy().is_parallel());
}

#[rstest]
#[case::auto(ExecutionStrategy::Auto)]
#[case::sequential(ExecutionStrategy::Sequential)]
fn reference_layout_cluster_product_is_forty(
    #[case] strategy: ExecutionStrategy,
    reference: PointStore,
) {
    let strand = StrandBuilder::new()
        .with_connections(10)
        .with_execution_strategy(strategy)
        .build()
        .expect("configuration must be valid");
    let report = strand.cluster(&reference).expect("cluster must succeed");
    assert_eq!(report.data_source(), "reference");
    assert_eq!(report.point_count(), 20);
    assert_eq!(report.edges_consumed(), 10);
    assert_eq!(report.sizes(), &[5, 4, 2]);
    assert_eq!(report.product(), 40);
}

#[rstest]
#[case::auto(ExecutionStrategy::Auto)]
#[case::sequential(ExecutionStrategy::Sequential)]
fn reference_layout_span_x_product(#[case] strategy: ExecutionStrategy, reference: PointStore) {
    let strand = StrandBuilder::new()
        .with_execution_strategy(strategy)
        .build()
        .expect("configuration must be valid");
    let report = strand.span(&reference).expect("span must succeed");
    let pair = report.spanning().expect("twenty points need an edge");
    assert_eq!(pair.edge().endpoints(), (10, 12));
    assert_eq!(pair.rank(), 28);
    assert_eq!(pair.left(), Point::new(216, 146, 977));
    assert_eq!(pair.right(), Point::new(117, 168, 530));
    assert_eq!(report.x_product(), Some(25_272));
}

#[rstest]
fn cluster_reports_fewer_sizes_than_top_k() {
    let strand = StrandBuilder::new()
        .with_connections(1)
        .build()
        .expect("configuration must be valid");
    let report = strand.cluster(&two_pairs()).expect("cluster must succeed");
    assert_eq!(report.sizes(), &[2]);
    assert_eq!(report.product(), 2);
}

#[rstest]
fn connections_beyond_the_pair_count_consume_every_edge() {
    let strand = StrandBuilder::new()
        .with_connections(500)
        .with_top_k(1)
        .build()
        .expect("configuration must be valid");
    let report = strand.cluster(&two_pairs()).expect("cluster must succeed");
    assert_eq!(report.edges_consumed(), 6);
    assert_eq!(report.sizes(), &[4]);
}

#[rstest]
#[case::empty(PointStore::new("empty", Vec::new()))]
#[case::single(PointStore::new("single", vec![Point::new(4, 5, 6)]))]
fn degenerate_stores_yield_trivial_reports(#[case] store: PointStore) {
    let strand = StrandBuilder::new()
        .build()
        .expect("configuration must be valid");

    let clusters = strand.cluster(&store).expect("cluster must succeed");
    assert!(clusters.sizes().is_empty());
    assert_eq!(clusters.product(), 1);
    assert_eq!(clusters.edges_consumed(), 0);

    let span = strand.span(&store).expect("span must succeed");
    assert!(span.spanning().is_none());
    assert_eq!(span.x_product(), None);
}

#[rstest]
fn cluster_records_core_tracing(reference: PointStore) {
    let strand = StrandBuilder::new()
        .with_connections(10)
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("configuration must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let report = tracing::subscriber::with_default(subscriber, || strand.cluster(&reference))
        .expect("cluster must succeed");
    assert_eq!(report.product(), 40);

    let cluster_span = layer
        .span_named("core.cluster")
        .expect("core.cluster span must exist");
    assert_eq!(cluster_span.field("data_source"), Some("reference"));
    assert_eq!(cluster_span.field("points"), Some("20"));
    assert_eq!(cluster_span.field("connections"), Some("10"));
    assert_eq!(cluster_span.field("top_k"), Some("3"));
    assert_eq!(cluster_span.field("strategy"), Some("Sequential"));

    assert!(layer.span_named("index.build").is_some());
    assert!(layer.span_named("ranker.take").is_some());
    assert!(layer.has_event(Level::INFO, "cluster query completed"));
}

#[rstest]
fn span_records_core_tracing() {
    let strand = StrandBuilder::new()
        .build()
        .expect("configuration must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let report = tracing::subscriber::with_default(subscriber, || strand.span(&two_pairs()))
        .expect("span must succeed");
    assert_eq!(report.x_product(), Some(10));

    let span = layer
        .span_named("core.span")
        .expect("core.span span must exist");
    assert_eq!(span.field("points"), Some("4"));
    assert!(layer.span_named("ranker.rank").is_some());
    assert!(layer.has_event(Level::INFO, "span query completed"));
}

#[rstest]
fn cluster_logs_empty_store_warning() {
    let strand = StrandBuilder::new()
        .build()
        .expect("configuration must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let report = tracing::subscriber::with_default(subscriber, || {
        strand.cluster(&PointStore::new("empty", Vec::new()))
    })
    .expect("empty stores are valid");
    assert!(report.sizes().is_empty());
    assert!(layer.has_event(
        Level::WARN,
        "point store is empty, reporting no components"
    ));
}

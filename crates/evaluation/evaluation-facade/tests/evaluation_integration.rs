//! Integration tests for the evaluation stack

use dataset_facade::{
    materialize_labels, parse_timestamp, DatasetEntry, Frequency, InstanceGenerator,
    OffsetSplitter, Splitter,
};
use evaluation_facade::{
    Evaluator, EvaluatorConfig, Forecast, GaussianForecast, QuantileEvaluator, SampleForecast,
};

fn dataset() -> Vec<DatasetEntry> {
    (0..2)
        .map(|i| {
            DatasetEntry::new(
                parse_timestamp("2021-01-01 00:00").unwrap(),
                Frequency::parse("1H").unwrap(),
                (0..48).map(|t| 10.0 + i as f64 + (t % 24) as f64).collect(),
            )
            .with_item_id(format!("item_{i}"))
        })
        .collect()
}

#[test]
fn test_label_copy_scores_zero() {
    let (_, generator) = OffsetSplitter::new(-6).unwrap().split(&dataset()).unwrap();
    let instances = generator.generate_instances(6, 1).unwrap();
    let labels = materialize_labels(&instances).unwrap();

    let forecasts: Vec<Box<dyn Forecast>> = instances
        .iter()
        .map(|instance| {
            let label = &instance.label;
            Box::new(
                SampleForecast::new(vec![label.target.clone()], label.start, label.freq)
                    .unwrap()
                    .with_item_id(label.item_id.clone()),
            ) as Box<dyn Forecast>
        })
        .collect();

    let evaluator = QuantileEvaluator::from_config(&EvaluatorConfig::default()).unwrap();
    let (agg, items) = evaluator.evaluate(&labels, &forecasts, Some(2)).unwrap();

    assert_eq!(items.len(), 2);
    for q in evaluator.quantiles() {
        assert_eq!(agg.get(&format!("QuantileLoss[{q}]")), Some(0.0));
    }
    assert_eq!(agg.get("mean_wQuantileLoss"), Some(0.0));
}

#[test]
fn test_wider_gaussian_costs_more() {
    let (_, generator) = OffsetSplitter::new(-6).unwrap().split(&dataset()).unwrap();
    let instances = generator.generate_instances(6, 1).unwrap();
    let labels = materialize_labels(&instances).unwrap();

    let score = |std_dev: f64| {
        let forecasts: Vec<Box<dyn Forecast>> = instances
            .iter()
            .map(|instance| {
                let label = &instance.label;
                Box::new(
                    GaussianForecast::new(
                        label.target.clone(),
                        vec![std_dev; label.len()],
                        label.start,
                        label.freq,
                    )
                    .unwrap(),
                ) as Box<dyn Forecast>
            })
            .collect();
        let (agg, _) = QuantileEvaluator::default()
            .evaluate(&labels, &forecasts, None)
            .unwrap();
        agg.get("mean_wQuantileLoss").unwrap()
    };

    assert!(score(0.5) < score(2.0));
}

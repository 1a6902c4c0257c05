//! Integration tests for the dataset stack

use dataset_facade::{
    is_uniform, materialize_labels, parse_timestamp, prepare_prediction_data, read_long_csv,
    read_wide_csv, DatasetEntry, Frequency, InstanceGenerator, LongFormatConfig, OffsetSplitter,
    SplitConfig, Splitter, WideFormatConfig,
};

fn hourly_dataset(series: usize, len: usize) -> Vec<DatasetEntry> {
    (0..series)
        .map(|i| {
            DatasetEntry::new(
                parse_timestamp("2021-01-01 00:00").unwrap(),
                Frequency::parse("1H").unwrap(),
                (0..len).map(|t| (t as f64 * 0.3).sin() + i as f64).collect(),
            )
            .with_item_id(format!("series_{i}"))
        })
        .collect()
}

#[test]
fn test_split_and_materialize() {
    let data = hourly_dataset(10, 100);
    let (train, generator) = OffsetSplitter::new(-10).unwrap().split(&data).unwrap();
    assert!(train.iter().all(|e| e.len() == 90));

    let instances = generator.generate_instances(10, 1).unwrap();
    let labels = materialize_labels(&instances).unwrap();

    assert_eq!(labels.len(), 10);
    for (label, instance) in labels.iter().zip(&instances) {
        assert_eq!(label.len(), 10);
        assert_eq!(label.index[0], parse_timestamp("2021-01-04 18:00").unwrap());
        assert!(is_uniform(&label.index, label.freq));
        assert_eq!(label.item_id, instance.input.item_id);
        assert_eq!(label.values, instance.label.target);
    }
}

#[test]
fn test_split_config_drives_windows() {
    let data = hourly_dataset(3, 60);
    let config = SplitConfig::new(6).windows(2);
    let (train, generator) = OffsetSplitter::from_config(&config).unwrap().split(&data).unwrap();

    assert_eq!(train[0].len(), 48);
    let instances = generator
        .generate_instances(config.prediction_length, config.windows)
        .unwrap();
    assert_eq!(instances.len(), 6);
    assert_eq!(instances[1].input.len(), 54);
}

#[test]
fn test_long_csv_to_instances() {
    let mut csv = String::from("timestamp,item_id,target\n");
    for item in ["A", "B"] {
        for day in 1..=20 {
            csv.push_str(&format!("2021-01-{day:02},{item},{day}\n"));
        }
    }

    let config = LongFormatConfig::new(Frequency::parse("1D").unwrap());
    let data = read_long_csv(csv.as_bytes(), &config).unwrap();
    assert_eq!(data.len(), 2);

    let (_, generator) = OffsetSplitter::new(-5).unwrap().split(&data).unwrap();
    let instances = generator.generate_instances(5, 1).unwrap();
    assert_eq!(instances[0].label.target, vec![16.0, 17.0, 18.0, 19.0, 20.0]);
    assert_eq!(instances[0].label.start, parse_timestamp("2021-01-16").unwrap());
}

#[test]
fn test_wide_and_long_agree() {
    let mut long = String::from("timestamp,item_id,target\n");
    let mut wide = String::from("timestamp,A,B\n");
    for day in 1..=10 {
        long.push_str(&format!("2021-01-{day:02},A,{day}\n2021-01-{day:02},B,{}\n", day * 10));
        wide.push_str(&format!("2021-01-{day:02},{day},{}\n", day * 10));
    }

    let freq = Frequency::parse("1D").unwrap();
    let from_long = read_long_csv(long.as_bytes(), &LongFormatConfig::new(freq)).unwrap();
    let from_wide = read_wide_csv(wide.as_bytes(), &WideFormatConfig::new(freq)).unwrap();
    assert_eq!(from_long, from_wide);
}

#[test]
fn test_month_end_labels() {
    let data = "timestamp,sales
2021-01-31,1
2021-02-28,2
2021-03-31,3
2021-04-30,4
2021-05-31,5
";
    let freq = Frequency::parse("M").unwrap();
    let entries = read_wide_csv(data.as_bytes(), &WideFormatConfig::new(freq)).unwrap();

    let (_, generator) = OffsetSplitter::new(-2).unwrap().split(&entries).unwrap();
    let labels = materialize_labels(&generator.generate_instances(2, 1).unwrap()).unwrap();
    assert_eq!(
        labels[0].index,
        vec![
            parse_timestamp("2021-04-30").unwrap(),
            parse_timestamp("2021-05-31").unwrap()
        ]
    );
}

#[test]
fn test_prepare_matches_split_input() {
    let entry = hourly_dataset(1, 40).remove(0);
    let prepared = prepare_prediction_data(&entry, 8).unwrap();

    let (_, generator) = OffsetSplitter::new(-8).unwrap().split(&[entry]).unwrap();
    let instance = generator.generate_instances(8, 1).unwrap().remove(0);

    assert_eq!(prepared.target, instance.input.target);
    assert_eq!(prepared.start, instance.input.start);
}

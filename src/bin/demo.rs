use arbor::data::dataset::Dataset;
use arbor::metrics::confusion::ClassificationMetrics;
use arbor::tree::classifier::DecisionTreeClassifier;
use csv::ReaderBuilder;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;
use std::env;
use std::error::Error;

/// Reads a labeled CSV into a dataset: the first `dimension` columns are
/// features, the next column is the class label. String labels are mapped
/// to integer ids in order of first appearance.
fn load_csv(
    file_path: &str,
    dimension: usize,
    header: bool,
) -> Result<Dataset<f64, u8>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(header)
        .from_path(file_path)?;
    let mut features = Vec::new();
    let mut labels: Vec<u8> = Vec::new();
    let mut label_map = HashMap::new();

    for result in reader.records() {
        let record = result?;

        for feature in record.iter().take(dimension) {
            features.push(feature.parse::<f64>()?);
        }

        let label = record.get(dimension).ok_or("Missing label")?;
        let next_id = label_map.len() as u8;
        let label_id = *label_map.entry(label.to_string()).or_insert(next_id);
        labels.push(label_id);
    }

    if labels.is_empty() {
        return Err("The dataset file holds no observations.".into());
    }

    let feature_matrix = DMatrix::from_row_slice(labels.len(), dimension, &features);
    let label_vector = DVector::from_vec(labels);

    Ok(Dataset::new(feature_matrix, label_vector))
}

fn run(file_path: &str, dimension: usize) -> Result<(), Box<dyn Error>> {
    let dataset = load_csv(file_path, dimension, true)?;
    println!("Loaded {} observations", dataset.nrows());

    let (train_dataset, test_dataset) = dataset.train_test_split(0.75, Some(42))?;

    let mut classifier = DecisionTreeClassifier::new();
    classifier.fit(&train_dataset)?;
    println!("Grew {} nodes", classifier.node_count());

    let predictions = classifier.predict(&test_dataset.x)?;
    let accuracy = classifier.accuracy(&test_dataset.y, &predictions)?;
    println!("Accuracy: {}%", accuracy * 100.0);

    Ok(())
}

fn main() {
    let mut args = env::args().skip(1);
    let file_path = args.next().unwrap_or_else(|| "datasets/iris.csv".to_string());
    let dimension = args
        .next()
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(4);

    if let Err(err) = run(&file_path, dimension) {
        panic!("{}", err);
    }
}

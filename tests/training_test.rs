// Integration test: training runs are reproducible and produce servable artifacts

use anyhow::Result;
use diabetes_predictor::config::TrainerConfig;
use diabetes_predictor::models::load_model;
use diabetes_predictor::training::Trainer;
use tempfile::TempDir;

fn trainer_config(dir: &TempDir, file: &str, seed: u64) -> TrainerConfig {
    TrainerConfig {
        model_path: dir.path().join(file),
        seed,
        ..TrainerConfig::default()
    }
}

fn coefficient_bits(coefficients: &[f64]) -> Vec<u64> {
    coefficients.iter().map(|c| c.to_bits()).collect()
}

#[test]
fn test_same_seed_gives_bit_identical_models() -> Result<()> {
    let dir = TempDir::new()?;

    let first = Trainer::new(trainer_config(&dir, "first.json", 42)).run()?;
    let second = Trainer::new(trainer_config(&dir, "second.json", 42)).run()?;

    assert_eq!(
        coefficient_bits(&first.artifact.coefficients),
        coefficient_bits(&second.artifact.coefficients)
    );
    assert_eq!(
        first.artifact.intercept.to_bits(),
        second.artifact.intercept.to_bits()
    );

    // What was written to disk matches as well
    let (from_disk, _) = load_model(&dir.path().join("second.json"))?;
    assert_eq!(
        coefficient_bits(&from_disk.coefficients().to_vec()),
        coefficient_bits(&first.artifact.coefficients)
    );

    Ok(())
}

#[test]
fn test_different_seed_changes_the_fit() -> Result<()> {
    let dir = TempDir::new()?;

    let a = Trainer::new(trainer_config(&dir, "a.json", 42)).run()?;
    let b = Trainer::new(trainer_config(&dir, "b.json", 7)).run()?;

    assert_ne!(a.artifact.coefficients, b.artifact.coefficients);
    Ok(())
}

#[test]
fn test_retraining_overwrites_artifact() -> Result<()> {
    let dir = TempDir::new()?;

    Trainer::new(trainer_config(&dir, "model.json", 1)).run()?;
    let latest = Trainer::new(trainer_config(&dir, "model.json", 2)).run()?;

    let (_, artifact) = load_model(&dir.path().join("model.json"))?;
    assert_eq!(artifact.seed, 2);
    assert_eq!(artifact.coefficients, latest.artifact.coefficients);
    Ok(())
}

#[test]
fn test_unwritable_path_fails() {
    let config = TrainerConfig {
        model_path: "/nonexistent/dir/model.json".into(),
        ..TrainerConfig::default()
    };
    assert!(Trainer::new(config).run().is_err());
}

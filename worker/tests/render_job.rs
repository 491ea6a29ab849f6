use complex_rs::complex::Complex;
use shared::models::fractal::{FractalError, Generation, RenderSettings};
use worker::{spawn_render, WorkerError};

fn quadratic(range: f64, step_size: f64) -> RenderSettings {
    RenderSettings {
        formula: "x^2-1".to_string(),
        derivative: Some("2*x".to_string()),
        range,
        step_size,
    }
}

#[tokio::test]
async fn rejects_configuration_before_spawning() {
    let result = spawn_render(quadratic(1.0, 5.0));
    assert!(matches!(
        result,
        Err(WorkerError::Fractal(FractalError::InvalidStep { .. }))
    ));
}

#[tokio::test]
async fn oversized_grid_is_a_configuration_error() {
    let result = spawn_render(quadratic(1e10, 1e-5));
    assert!(matches!(
        result,
        Err(WorkerError::Fractal(FractalError::GridTooLarge { .. }))
    ));
}

#[tokio::test]
async fn streams_progress_and_returns_the_image() {
    let mut handle = spawn_render(quadratic(2.0, 1.0)).unwrap();

    let mut events = Vec::new();
    while let Some(percent) = handle.progress.recv().await {
        events.push(percent);
    }
    assert_eq!(events.first(), Some(&0));
    assert_eq!(events.last(), Some(&100));

    let generation = handle.join().await.unwrap();
    let Generation::Completed(image) = generation else {
        panic!("render was not expected to be cancelled");
    };
    assert_eq!(image.size, 4);
    let roots: Vec<Complex> = image.discovered_roots().map(|entry| entry.root).collect();
    assert_eq!(roots.len(), 2);
}

#[tokio::test]
async fn cancelled_job_reports_partial_image() {
    let mut handle = spawn_render(quadratic(2.0, 0.002)).unwrap();
    handle.cancel();

    let mut last = None;
    while let Some(percent) = handle.progress.recv().await {
        last = Some(percent);
    }
    assert_ne!(last, Some(100));

    let generation = handle.join().await.unwrap();
    assert!(generation.is_cancelled());
    assert_eq!(generation.image().size, 2000);
}

#[tokio::test]
async fn jobs_get_distinct_ids() {
    let first = spawn_render(quadratic(1.0, 0.5)).unwrap();
    let second = spawn_render(quadratic(1.0, 0.5)).unwrap();
    assert_ne!(first.id, second.id);

    assert!(!first.join().await.unwrap().is_cancelled());
    assert!(!second.join().await.unwrap().is_cancelled());
}

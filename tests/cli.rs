use std::path::Path;
use std::process::{Command, Output};

use opencv::core::{Mat, Scalar, Vector, CV_8UC1};
use opencv::imgcodecs::imwrite;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_image_edges"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to run image_edges")
}

fn write_gray(path: &Path) {
    let image = Mat::new_rows_cols_with_default(16, 16, CV_8UC1, Scalar::all(90.0)).unwrap();
    assert!(imwrite(&path.to_string_lossy(), &image, &Vector::new()).unwrap());
}

#[test]
fn test_unsupported_method_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cells.png");
    let output = dir.path().join("cells_out.png");
    write_gray(&input);

    let result = run(&[
        "-i", &input.to_string_lossy(),
        "-o", &output.to_string_lossy(),
        "-m", "laplace",
        "--no-display",
    ]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("laplace is an unsupported edge-detecting method!"), "{}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_missing_input_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.png");
    let output = dir.path().join("missing_out.png");

    let result = run(&[
        "-i", &input.to_string_lossy(),
        "-o", &output.to_string_lossy(),
        "--no-display",
    ]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("failed to read image"), "{}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_headless_run_writes_edges() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cells.png");
    let output = dir.path().join("cells_out.png");
    write_gray(&input);

    let result = run(&[
        "-i", &input.to_string_lossy(),
        "-o", &output.to_string_lossy(),
        "-m", "prewitt",
        "--no-display",
    ]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert!(output.exists());
}

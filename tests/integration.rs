use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};
use weather_analysis::ResultTable;

fn run_bin(args: &[&str]) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_weather_analysis"));

    Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command")
}

fn assert_success(output: &Output, args: &[&str]) {
    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("failed to convert path to string")
}

fn prepare_dir(name: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");
    test_dir
}

#[test]
fn basic_workflow() {
    let test_dir = prepare_dir("basic_workflow");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[input]\n"
        + "date_column = \"time\"\n"
        + "value_column = \"tavg\"\n"
        + "\n"
        + "[processing]\n"
        + "window = 3\n";
    fs::write(&config_path, config_contents).expect("failed to write config file");

    let input_path = test_dir.join("weather.csv");
    let temperatures = [0.0, 1.0, 2.0, 1.0, 3.0, 4.0, 2.0, 5.0, 6.0, 7.0];
    let mut input_contents = String::from("time,tavg,prcp\n");
    for (day, temperature) in temperatures.iter().enumerate() {
        input_contents += &format!("2023-01-{:02},{temperature},0.0\n", day + 1);
    }
    fs::write(&input_path, input_contents).expect("failed to write input file");

    let csv_path = test_dir.join("result.csv");
    let msgpack_path = test_dir.join("result.msgpack");

    let common = ["--input", path_str(&input_path), "--config", path_str(&config_path)];

    let args = [&common[..], &["inspect"]].concat();
    assert_success(&run_bin(&args), &args);

    let args = [&common[..], &["process", "--output", path_str(&csv_path)]].concat();
    assert_success(&run_bin(&args), &args);

    let args = [&common[..], &["process", "--output", path_str(&msgpack_path)]].concat();
    assert_success(&run_bin(&args), &args);

    let csv_contents = fs::read_to_string(&csv_path).expect("failed to read csv output");
    let lines: Vec<_> = csv_contents.lines().collect();
    assert_eq!(lines.len(), temperatures.len() + 1);
    assert_eq!(
        lines[0],
        "date,temperature,moving_average,differential,autocorrelation,maxima,minima"
    );
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), 7);
    }

    let msgpack_file = fs::File::open(&msgpack_path).expect("failed to open msgpack output");
    let table: ResultTable =
        rmp_serde::from_read(msgpack_file).expect("failed to deserialize msgpack output");
    assert_eq!(table.window, 3);
    assert_eq!(table.rows.len(), temperatures.len());
    assert_eq!(table.rows[2].moving_average, Some(1.0));
    assert_eq!(table.rows[5].maxima, Some(4.0));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn default_config() {
    let test_dir = prepare_dir("default_config");

    let input_path = test_dir.join("weather.csv");
    let mut input_contents = String::from("date,temperature\n");
    for day in 1..=20 {
        let temperature = (day as f64 / 3.0).sin() * 8.0 + 12.0;
        input_contents += &format!("2024-03-{day:02},{temperature:.2}\n");
    }
    fs::write(&input_path, input_contents).expect("failed to write input file");

    let output_path = test_dir.join("result.csv");
    let args = [
        "--input",
        path_str(&input_path),
        "process",
        "--output",
        path_str(&output_path),
    ];
    assert_success(&run_bin(&args), &args);

    let contents = fs::read_to_string(&output_path).expect("failed to read output");
    let n_moving_avgs = contents
        .lines()
        .skip(1)
        .filter(|line| !line.split(',').nth(2).unwrap_or_default().is_empty())
        .count();
    assert_eq!(n_moving_avgs, 20 - 7 + 1);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn invalid_inputs_fail() {
    let test_dir = prepare_dir("invalid_inputs_fail");

    let short_path = test_dir.join("short.csv");
    fs::write(&short_path, "date,temperature\n2023-01-01,4.0\n")
        .expect("failed to write input file");
    let output = run_bin(&["--input", path_str(&short_path), "inspect"]);
    assert!(!output.status.success());

    let unsorted_path = test_dir.join("unsorted.csv");
    fs::write(
        &unsorted_path,
        "date,temperature\n2023-01-02,4.0\n2023-01-01,5.0\n2023-01-03,1.0\n",
    )
    .expect("failed to write input file");
    let output = run_bin(&["--input", path_str(&unsorted_path), "inspect"]);
    assert!(!output.status.success());

    let valid_path = test_dir.join("valid.csv");
    fs::write(
        &valid_path,
        "date,temperature\n2023-01-01,4.0\n2023-01-02,5.0\n2023-01-03,1.0\n",
    )
    .expect("failed to write input file");
    let bad_output = test_dir.join("result.xlsx");
    let output = run_bin(&[
        "--input",
        path_str(&valid_path),
        "process",
        "--output",
        path_str(&bad_output),
    ]);
    assert!(!output.status.success());
    assert!(!bad_output.exists());

    fs::remove_dir_all(&test_dir).ok();
}

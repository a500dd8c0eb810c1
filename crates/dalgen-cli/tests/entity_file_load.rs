use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dalgen_cli_{}_{name}", std::process::id()))
}

#[test]
fn generate_reads_a_json_entity_and_writes_artifacts() {
    let entity_path = temp_path("customer.json");
    let out_dir = temp_path("out_json");
    fs::write(
        &entity_path,
        r#"{
            "name": "Customer",
            "schema_name": "dbo",
            "attributes": [
                {"name": "Id", "data_type": "integer", "is_primary_key": true, "auto_increment": true},
                {"name": "Name", "data_type": "text", "size": 50}
            ]
        }"#,
    )
    .expect("write entity file");

    let status = Command::new(env!("CARGO_BIN_EXE_dalgen"))
        .arg("generate")
        .arg(&entity_path)
        .args(["--target", "tsql"])
        .arg("--out")
        .arg(&out_dir)
        .status()
        .expect("run dalgen");

    assert!(status.success());
    let table = fs::read_to_string(out_dir.join("customer_create_table.sql"))
        .expect("read generated table script");
    assert!(table.contains("CREATE TABLE [dbo].[Customer]"));
    assert!(table.contains("IDENTITY(1,1)"));

    fs::remove_file(&entity_path).ok();
    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn generate_reads_a_toml_entity() {
    let entity_path = temp_path("note.toml");
    let out_dir = temp_path("out_toml");
    fs::write(
        &entity_path,
        r#"
name = "Note"

[[attributes]]
name = "Id"
data_type = "integer"
is_primary_key = true
auto_increment = true

[[attributes]]
name = "Body"
data_type = "text"
size = 400
"#,
    )
    .expect("write entity file");

    let status = Command::new(env!("CARGO_BIN_EXE_dalgen"))
        .arg("generate")
        .arg(&entity_path)
        .args(["--target", "mysql"])
        .arg("--out")
        .arg(&out_dir)
        .status()
        .expect("run dalgen");

    assert!(status.success());
    assert!(out_dir.join("note_insert.sql").exists());

    fs::remove_file(&entity_path).ok();
    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn validation_failures_exit_nonzero_with_a_message() {
    let entity_path = temp_path("invalid.json");
    let out_dir = temp_path("out_invalid");
    fs::write(
        &entity_path,
        r#"{"name": "", "attributes": [{"name": "Id", "data_type": "integer"}]}"#,
    )
    .expect("write entity file");

    let output = Command::new(env!("CARGO_BIN_EXE_dalgen"))
        .arg("generate")
        .arg(&entity_path)
        .args(["--target", "tsql"])
        .arg("--out")
        .arg(&out_dir)
        .output()
        .expect("run dalgen");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("you must provide an entity name"));

    fs::remove_file(&entity_path).ok();
    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn unsupported_extension_is_rejected() {
    let entity_path = temp_path("entity.yaml");
    fs::write(&entity_path, "name: Customer").expect("write entity file");

    let output = Command::new(env!("CARGO_BIN_EXE_dalgen"))
        .arg("generate")
        .arg(&entity_path)
        .args(["--target", "tsql"])
        .output()
        .expect("run dalgen");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported entity file extension"));

    fs::remove_file(&entity_path).ok();
}

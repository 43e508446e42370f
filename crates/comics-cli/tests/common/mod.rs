use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};

/// Run the CLI binary against the document at `data`.
pub fn run_cli(args: &[&str], data: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_comics"));
    cmd.args(args);
    cmd.env("COMICS_DATA", data);
    cmd.env_remove("COMICS_COLLECTION_KEY");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], data: &Path) -> String {
    let output = run_cli(args, data);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Write a document holding `records` under the default key.
pub fn seed(data: &Path, records: Value) {
    std::fs::write(data, json!({ "personajes_dc": records }).to_string()).unwrap();
}

pub fn bruce() -> Value {
    json!({
        "id": 1,
        "nombre": "Bruce Wayne",
        "edad": 35,
        "ciudad": "Gotham",
        "poderes": ["riqueza"],
        "aliados": {"nombre": ["Alfred"], "tipo": "Humanos"},
        "enemigos": ["Joker"],
        "primera_aparicion": "Detective Comics 27",
        "hobbies": ["detective"],
        "activo": true,
        "created_at": "2024-05-01 12:30"
    })
}

pub fn clark() -> Value {
    json!({
        "id": 2,
        "nombre": "Clark Kent",
        "edad": 33,
        "ciudad": "Metropolis",
        "poderes": ["vuelo"],
        "aliados": {"nombre": ["Lois Lane"], "tipo": "Humanos"},
        "enemigos": ["Lex Luthor"],
        "primera_aparicion": "Action Comics 1",
        "hobbies": ["periodismo"],
        "activo": true,
        "created_at": "2024-05-02 09:00",
        "updated_at": "2024-05-03 10:00"
    })
}

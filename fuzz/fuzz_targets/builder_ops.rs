#![no_main]

//! Fuzz target for the config tree builder.
//!
//! Applies arbitrary sequences of file, unit and drop-in operations from
//! inline sources and checks the builder invariants: unique unit names,
//! unique drop-in names per unit, and a document that always renders.

use libfuzzer_sys::fuzz_target;
use mcmaker_edit::{InlineSource, McMaker};
use std::collections::BTreeSet;

#[derive(Debug, arbitrary::Arbitrary)]
struct BuilderInput {
    name: String,
    role: Option<String>,
    ops: Vec<FuzzOp>,
}

#[derive(Debug, arbitrary::Arbitrary)]
enum FuzzOp {
    File {
        path: String,
        mode: u32,
        contents: Vec<u8>,
    },
    Unit {
        name: String,
        file_name: Option<String>,
        enabled: bool,
        contents: Vec<u8>,
    },
    Dropin {
        unit: String,
        name: String,
        file_name: Option<String>,
        contents: Vec<u8>,
    },
}

fn source(file_name: Option<String>, contents: Vec<u8>) -> InlineSource {
    match file_name {
        Some(n) => InlineSource::named(n, contents),
        None => InlineSource::new(contents),
    }
}

fuzz_target!(|input: BuilderInput| {
    let mut m = McMaker::new(input.name.clone());
    if let Some(role) = &input.role {
        m.set_role(role);
    }

    for op in input.ops {
        let before = m.ignition().clone();
        let result = match op {
            FuzzOp::File { path, mode, contents } => {
                m.add_file(&InlineSource::new(contents), &path, mode)
            }
            FuzzOp::Unit { name, file_name, enabled, contents } => {
                m.add_unit(&source(file_name, contents), &name, enabled)
            }
            FuzzOp::Dropin { unit, name, file_name, contents } => {
                m.add_dropin(&source(file_name, contents), &unit, &name)
            }
        };
        if result.is_err() {
            assert_eq!(m.ignition(), &before, "failed operation mutated the builder");
        }
    }

    let units = &m.ignition().systemd.units;
    let names: BTreeSet<&str> = units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names.len(), units.len(), "duplicate unit names");
    for unit in units {
        let dropins: BTreeSet<&str> = unit.dropins.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(dropins.len(), unit.dropins.len(), "duplicate drop-in names");
    }

    let mut out = Vec::new();
    let _ = m.write_to(&mut out);
});

use crate::exec;
use crate::exec::ExternalCommand;

use color_eyre::eyre::{Report, Result};
use std::path::{Path, PathBuf};

#[test]
fn beast_cpu_arguments() -> Result<(), Report> {
    let command = exec::beast(Path::new("control_file.xml"), Path::new("chain"), false, 4)?;

    assert_eq!("beast", command.program);
    let expected =
        vec!["-beagle_CPU", "-beagle_SSE", "-beagle_instances", "4", "control_file.xml"];
    assert_eq!(expected, command.args);
    assert_eq!(Some(PathBuf::from("chain")), command.cwd);
    Ok(())
}

#[test]
fn beast_gpu_arguments() -> Result<(), Report> {
    let command = exec::beast(Path::new("control_file.xml"), Path::new("chain"), true, 1)?;

    let expected =
        vec!["-beagle_GPU", "-beagle_cuda", "-beagle_instances", "1", "control_file.xml"];
    assert_eq!(expected, command.args);
    Ok(())
}

#[test]
fn gpu_excludes_multithreading() -> Result<(), Report> {
    // raised before any subprocess is constructed
    assert!(exec::beast(Path::new("control_file.xml"), Path::new("chain"), true, 4).is_err());
    assert!(exec::beast(Path::new("control_file.xml"), Path::new("chain"), false, 0).is_err());
    Ok(())
}

#[test]
fn logcombiner_arguments() -> Result<(), Report> {
    let inputs = vec![PathBuf::from("a/posterior.log"), PathBuf::from("b/posterior.log")];
    let command = exec::logcombiner(&inputs, Path::new("out/posterior.log"), 500, false, Some(1000));

    let expected = vec![
        "-burnin",
        "500",
        "-resample",
        "1000",
        "a/posterior.log",
        "b/posterior.log",
        "out/posterior.log",
    ];
    assert_eq!(expected, command.args);
    Ok(())
}

#[test]
fn logcombiner_tree_mode() -> Result<(), Report> {
    let inputs = vec![PathBuf::from("a/posterior.trees")];
    let command = exec::logcombiner(&inputs, Path::new("out/posterior.trees"), 100, true, None);

    let expected = vec!["-burnin", "100", "-trees", "a/posterior.trees", "out/posterior.trees"];
    assert_eq!(expected, command.args);
    Ok(())
}

#[test]
fn treeannotator_arguments() -> Result<(), Report> {
    let command =
        exec::treeannotator(Path::new("chain/posterior.trees"), Path::new("out/data.nex"), 500);

    let expected = vec!["-burnin", "500", "chain/posterior.trees", "out/data.nex"];
    assert_eq!(expected, command.args);
    Ok(())
}

#[test]
fn augur_import_and_export_arguments() -> Result<(), Report> {
    let command = exec::augur_import(
        Path::new("mcc/data.nex"),
        Path::new("out/tree.nwk"),
        Path::new("out/node_data.json"),
        2019.7,
    );
    assert_eq!("augur", command.program);
    assert_eq!(vec!["import", "beast"], command.args[0..2].to_vec());
    assert!(command.args.contains(&"--most-recent-tip-date".to_string()));
    assert!(command.args.contains(&"2019.7".to_string()));

    let command = exec::augur_export(
        Path::new("out/tree.nwk"),
        Path::new("out/node_data.json"),
        Path::new("out/auspice_config.json"),
        Path::new("out/dataset/beast.json"),
    );
    assert_eq!(vec!["export", "v2"], command.args[0..2].to_vec());
    Ok(())
}

#[test]
fn nonzero_exit_is_fatal() -> Result<(), Report> {
    let ok = ExternalCommand::new("sh", vec!["-c".to_string(), "exit 0".to_string()]);
    assert!(ok.run().is_ok());

    let fail = ExternalCommand::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);
    assert!(fail.run().is_err());
    Ok(())
}

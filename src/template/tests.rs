use crate::table::Table;
use crate::template::{
    join_partitioned, join_samples, render_gtr_single_partition, render_site_heterogeneous_hky,
    BaseFreq, Clock, Coalescent, GtrModel, Mcmc, Sample,
};

use color_eyre::eyre::{Report, Result};

fn metadata() -> Result<Table<String>, Report> {
    let mut table = Table::new();
    table.headers =
        vec!["id", "Sequence", "time", "time_uncertainty"].into_iter().map(String::from).collect();
    table.add_row(strings(vec!["EBOV/A", "ACGTACGT", "2014.2", "0.1"]))?;
    table.add_row(strings(vec!["EBOV/B", "ACGTACGA", "2014.6", ""]))?;
    // incomplete rows, dropped by the inner join
    table.add_row(strings(vec!["EBOV/C", "", "2014.9", "0.2"]))?;
    table.add_row(strings(vec!["EBOV/D", "ACGTACGG", "", ""]))?;
    Ok(table)
}

fn strings(row: Vec<&str>) -> Vec<String> {
    row.into_iter().map(String::from).collect()
}

fn gtr_model() -> GtrModel {
    GtrModel {
        base_freq: BaseFreq::Estimated,
        site_gamma: 4,
        site_invariant: true,
        clock: Clock::Ucln,
        coalescent: Coalescent::Skygrid,
        skygrid_intervals: Some(50),
        skygrid_duration: Some(10.0),
    }
}

fn mcmc() -> Mcmc {
    Mcmc { n_generations: 10_000_000, sample_every: 1000, print_every: None }
}

#[test]
fn inner_join_drops_incomplete_rows() -> Result<(), Report> {
    let samples = join_samples(&metadata()?, "time", Some("time_uncertainty"))?;

    let observed: Vec<&str> = samples.iter().map(|s| s.id.as_str()).collect();
    let expected = vec!["EBOV/A", "EBOV/B"];
    assert_eq!(expected, observed);

    assert_eq!(Some(0.1), samples[0].time_uncertainty);
    assert_eq!(None, samples[1].time_uncertainty);
    Ok(())
}

#[test]
fn join_requires_complete_samples() -> Result<(), Report> {
    let mut table = Table::new();
    table.headers = vec!["id", "Sequence", "time"].into_iter().map(String::from).collect();
    table.add_row(strings(vec!["EBOV/A", "", ""]))?;
    assert!(join_samples(&table, "time", None).is_err());
    Ok(())
}

#[test]
fn partitioned_join_intersects_ids() -> Result<(), Report> {
    let coding = metadata()?;
    let mut noncoding = Table::new();
    noncoding.headers = vec!["id", "Sequence"].into_iter().map(String::from).collect();
    noncoding.add_row(strings(vec!["EBOV/B", "TTTTAAAA"]))?;
    noncoding.add_row(strings(vec!["EBOV/Z", "TTTTAAAC"]))?;

    let samples = join_partitioned(&coding, &noncoding, "time", Some("time_uncertainty"))?;
    assert_eq!(1, samples.len());
    assert_eq!("EBOV/B", samples[0].id);
    assert_eq!("ACGTACGA", samples[0].seq_orf);
    assert_eq!("TTTTAAAA", samples[0].seq_nc);
    Ok(())
}

#[test]
fn skygrid_requires_intervals_and_duration() -> Result<(), Report> {
    let samples = join_samples(&metadata()?, "time", None)?;

    let mut model = gtr_model();
    model.skygrid_duration = None;
    assert!(render_gtr_single_partition(&samples, &model, &mcmc()).is_err());

    let mut model = gtr_model();
    model.skygrid_intervals = None;
    assert!(render_gtr_single_partition(&samples, &model, &mcmc()).is_err());

    // other coalescent models do not need the skygrid parameters
    let model = GtrModel {
        coalescent: Coalescent::Constant,
        skygrid_intervals: None,
        skygrid_duration: None,
        ..gtr_model()
    };
    assert!(render_gtr_single_partition(&samples, &model, &mcmc()).is_ok());
    Ok(())
}

#[test]
fn missing_uncertainty_is_an_explicit_marker() -> Result<(), Report> {
    let samples = vec![Sample {
        id: "EBOV/B".to_string(),
        seq: "ACGT".to_string(),
        time: 2014.6,
        time_uncertainty: None,
    }];
    let xml = render_gtr_single_partition(&samples, &gtr_model(), &mcmc())?;
    assert!(xml.contains(r#"uncertainty="unknown""#));
    Ok(())
}

#[test]
fn gtr_control_file_contents() -> Result<(), Report> {
    let samples = join_samples(&metadata()?, "time", Some("time_uncertainty"))?;
    let xml = render_gtr_single_partition(&samples, &gtr_model(), &mcmc())?;

    // taxa and sequences
    assert!(xml.contains(r#"<taxon id="EBOV/A">"#));
    assert!(xml.contains(r#"<date value="2014.2" direction="forwards" units="years" uncertainty="0.1"/>"#));
    assert!(xml.contains("ACGTACGA"));

    // model blocks
    assert!(xml.contains(r#"<gammaShape gammaCategories="4">"#));
    assert!(xml.contains("proportionInvariant"));
    assert!(xml.contains(r#"<discretizedBranchRates id="branchRates">"#));
    assert!(xml.contains(r#"<parameter id="skygrid.logPopSize" dimension="50" value="1.0"/>"#));
    assert!(xml.contains(r#"<parameter id="skygrid.cutOff" value="10"/>"#));

    // mcmc block with chain-relative artifact paths
    assert!(xml.contains(r#"chainLength="10000000""#));
    assert!(xml.contains(r#"fileName="posterior.log""#));
    assert!(xml.contains(r#"fileName="posterior.trees""#));
    assert!(xml.contains(r#"operatorAnalysis="posterior.ops""#));
    Ok(())
}

#[test]
fn print_every_defaults_to_sample_every() -> Result<(), Report> {
    let samples = join_samples(&metadata()?, "time", None)?;

    let mcmc = Mcmc { n_generations: 1000, sample_every: 250, print_every: None };
    let xml = render_gtr_single_partition(&samples, &gtr_model(), &mcmc)?;
    assert!(xml.contains(r#"<log id="screenLog" logEvery="250">"#));

    let mcmc = Mcmc { n_generations: 1000, sample_every: 250, print_every: Some(500) };
    let xml = render_gtr_single_partition(&samples, &gtr_model(), &mcmc)?;
    assert!(xml.contains(r#"<log id="screenLog" logEvery="500">"#));
    Ok(())
}

#[test]
fn mcmc_intervals_must_be_positive() -> Result<(), Report> {
    let samples = join_samples(&metadata()?, "time", None)?;
    let mcmc = Mcmc { n_generations: 0, sample_every: 1000, print_every: None };
    assert!(render_gtr_single_partition(&samples, &gtr_model(), &mcmc).is_err());
    Ok(())
}

#[test]
fn hky_control_file_contents() -> Result<(), Report> {
    let coding = metadata()?;
    let mut noncoding = Table::new();
    noncoding.headers = vec!["id", "Sequence"].into_iter().map(String::from).collect();
    noncoding.add_row(strings(vec!["EBOV/A", "TTTTAAAA"]))?;
    noncoding.add_row(strings(vec!["EBOV/B", "TTTTAAAC"]))?;

    let samples = join_partitioned(&coding, &noncoding, "time", Some("time_uncertainty"))?;
    let xml = render_site_heterogeneous_hky(&samples, &mcmc())?;

    // one substitution and site model per partition, one shared tree
    assert!(xml.contains(r#"<HKYModel id="hky.orf">"#));
    assert!(xml.contains(r#"<HKYModel id="hky.nc">"#));
    assert!(xml.contains(r#"<alignment id="alignment.orf" dataType="nucleotide">"#));
    assert!(xml.contains(r#"<alignment id="alignment.nc" dataType="nucleotide">"#));
    assert!(xml.contains(r#"<patterns idref="patterns.orf"/>"#));
    assert!(xml.contains(r#"<patterns idref="patterns.nc"/>"#));
    assert_eq!(1, xml.matches(r#"<treeModel id="treeModel">"#).count());
    Ok(())
}

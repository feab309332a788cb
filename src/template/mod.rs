//! BEAST XML control-file templating.
//!
//! A control file fully specifies one sampler run: the dated taxa, the
//! aligned sequences, the substitution/site/clock/coalescent models, the
//! operators, and the MCMC block with its output file names. The output
//! file names are chain-relative so that BEAST, run with the chain directory
//! as working directory, writes all artifacts into the chain directory.

use crate::chain::{LOG_FILE, OPS_FILE, TREES_FILE};
use crate::table::Table;
use clap::ValueEnum;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use indoc::formatdoc;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ----------------------------------------------------------------------------
// Samples

/// One dated, aligned specimen to be templated into the taxa block.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Sample {
    pub id: String,
    pub seq: String,
    /// Collection time in decimal years.
    pub time: f64,
    /// Collection-time uncertainty in years. Templated as an explicit
    /// `unknown` marker when absent.
    pub time_uncertainty: Option<f64>,
}

/// A specimen split into a coding and a non-coding alignment partition.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PartitionedSample {
    pub id: String,
    pub seq_orf: String,
    pub seq_nc: String,
    pub time: f64,
    pub time_uncertainty: Option<f64>,
}

/// Name of the metadata column holding the aligned sequence.
pub const SEQUENCE_COLUMN: &str = "Sequence";

fn parse_time(id: &str, value: &str) -> Result<f64, Report> {
    value
        .parse()
        .wrap_err_with(|| format!("Failed to parse collection time {value:?} of sample {id:?}"))
}

fn parse_uncertainty(id: &str, value: Option<&str>) -> Result<Option<f64>, Report> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => {
            let uncertainty = v.parse().wrap_err_with(|| {
                format!("Failed to parse time uncertainty {v:?} of sample {id:?}")
            })?;
            Ok(Some(uncertainty))
        }
    }
}

/// Join sample metadata into templating order.
///
/// The first metadata column is the specimen id. Rows missing the sequence
/// or the collection time are dropped (inner-join semantics); a missing
/// uncertainty is kept as [`None`].
pub fn join_samples(
    metadata: &Table<String>,
    time_column: &str,
    uncertainty_column: Option<&str>,
) -> Result<Vec<Sample>, Report> {
    let seq_i = metadata.get_header_index(SEQUENCE_COLUMN)?;
    let time_i = metadata.get_header_index(time_column)?;
    let uncertainty_i = match uncertainty_column {
        Some(column) => Some(metadata.get_header_index(column)?),
        None => None,
    };

    let mut samples = Vec::new();
    for row in &metadata.rows {
        let id = row[0].trim();
        let seq = row[seq_i].trim();
        let time = row[time_i].trim();
        // inner join: any missing required field drops the row
        if id.is_empty() || seq.is_empty() || time.is_empty() {
            continue;
        }
        samples.push(Sample {
            id: id.to_string(),
            seq: seq.to_string(),
            time: parse_time(id, time)?,
            time_uncertainty: parse_uncertainty(id, uncertainty_i.map(|i| row[i].as_str()))?,
        });
    }

    if samples.is_empty() {
        return Err(eyre!("No samples with complete sequence and time metadata were found.")
            .suggestion(format!("Does the metadata have '{SEQUENCE_COLUMN}' and '{time_column}' values?")));
    }
    Ok(samples)
}

/// Join coding and non-coding metadata into partitioned templating order.
///
/// A specimen is kept only if it has a sequence in both partitions and a
/// collection time (inner-join across the three columns).
pub fn join_partitioned(
    coding: &Table<String>,
    noncoding: &Table<String>,
    time_column: &str,
    uncertainty_column: Option<&str>,
) -> Result<Vec<PartitionedSample>, Report> {
    let nc_seq_i = noncoding.get_header_index(SEQUENCE_COLUMN)?;
    let nc: BTreeMap<&str, &str> = noncoding
        .rows
        .iter()
        .map(|row| (row[0].trim(), row[nc_seq_i].trim()))
        .filter(|(id, seq)| !id.is_empty() && !seq.is_empty())
        .collect();

    let samples = join_samples(coding, time_column, uncertainty_column)?
        .into_iter()
        .filter_map(|sample| {
            let seq_nc = nc.get(sample.id.as_str())?;
            Some(PartitionedSample {
                id: sample.id,
                seq_orf: sample.seq,
                seq_nc: seq_nc.to_string(),
                time: sample.time,
                time_uncertainty: sample.time_uncertainty,
            })
        })
        .collect_vec();

    if samples.is_empty() {
        return Err(eyre!(
            "No samples are shared between the coding and non-coding metadata."
        ));
    }
    Ok(samples)
}

// ----------------------------------------------------------------------------
// Run Parameters

/// Base frequency treatment of the substitution model.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize, ValueEnum)]
pub enum BaseFreq {
    #[default]
    Estimated,
    Empirical,
}

/// Molecular clock model.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize, ValueEnum)]
pub enum Clock {
    Strict,
    /// Uncorrelated lognormal relaxed clock.
    #[default]
    Ucln,
}

/// Coalescent population model.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize, ValueEnum)]
pub enum Coalescent {
    Constant,
    Exponential,
    #[default]
    Skygrid,
}

impl std::fmt::Display for BaseFreq {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl std::fmt::Display for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl std::fmt::Display for Coalescent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

/// Chain-length and sampling-interval parameters of the MCMC block.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Mcmc {
    pub n_generations: u64,
    pub sample_every: u64,
    /// Screen-log interval. Defaults to `sample_every` when absent.
    pub print_every: Option<u64>,
}

impl Mcmc {
    pub fn print_every(&self) -> u64 {
        self.print_every.unwrap_or(self.sample_every)
    }

    pub fn validate(&self) -> Result<(), Report> {
        if self.n_generations == 0 || self.sample_every == 0 || self.print_every() == 0 {
            return Err(eyre!(
                "MCMC intervals must be positive: n_generations={}, sample_every={}, print_every={}",
                self.n_generations,
                self.sample_every,
                self.print_every()
            ));
        }
        Ok(())
    }
}

/// Model choices of the GTR single-partition analysis.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GtrModel {
    pub base_freq: BaseFreq,
    /// Number of gamma rate categories.
    pub site_gamma: u32,
    /// Estimate a proportion of invariant sites.
    pub site_invariant: bool,
    pub clock: Clock,
    pub coalescent: Coalescent,
    pub skygrid_intervals: Option<u32>,
    pub skygrid_duration: Option<f64>,
}

impl GtrModel {
    /// Reject parameter combinations before any file is written or
    /// subprocess launched.
    pub fn validate(&self) -> Result<(), Report> {
        if self.coalescent == Coalescent::Skygrid
            && (self.skygrid_intervals.is_none() || self.skygrid_duration.is_none())
        {
            return Err(eyre!("The skygrid coalescent model is not parameterized.").suggestion(
                "Please provide both --skygrid-intervals and --skygrid-duration.",
            ));
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// XML Blocks

fn taxa_block<'s>(
    samples: impl Iterator<Item = (&'s str, f64, Option<f64>)>,
) -> String {
    samples
        .map(|(id, time, uncertainty)| {
            // missing uncertainty is an explicit marker, not an omitted attribute
            let uncertainty = match uncertainty {
                Some(u) => u.to_string(),
                None => "unknown".to_string(),
            };
            formatdoc! {r#"
                <taxon id="{id}">
                  <date value="{time}" direction="forwards" units="years" uncertainty="{uncertainty}"/>
                </taxon>"#}
        })
        .join("\n")
}

fn alignment_block<'s>(id: &str, sequences: impl Iterator<Item = (&'s str, &'s str)>) -> String {
    let sequences = sequences
        .map(|(taxon, seq)| {
            formatdoc! {r#"
                <sequence>
                  <taxon idref="{taxon}"/>
                  {seq}
                </sequence>"#}
        })
        .join("\n");
    formatdoc! {r#"
        <alignment id="{id}" dataType="nucleotide">
        {sequences}
        </alignment>"#}
}

fn frequencies_block(base_freq: BaseFreq) -> String {
    match base_freq {
        BaseFreq::Estimated => formatdoc! {r#"
            <frequencyModel dataType="nucleotide">
              <frequencies>
                <parameter id="frequencies" value="0.25 0.25 0.25 0.25"/>
              </frequencies>
            </frequencyModel>"#},
        BaseFreq::Empirical => formatdoc! {r#"
            <frequencyModel dataType="nucleotide">
              <alignment idref="alignment"/>
              <frequencies>
                <parameter id="frequencies" dimension="4"/>
              </frequencies>
            </frequencyModel>"#},
    }
}

fn clock_block(clock: Clock) -> (String, &'static str) {
    match clock {
        Clock::Strict => {
            let block = formatdoc! {r#"
                <strictClockBranchRates id="branchRates">
                  <rate>
                    <parameter id="clock.rate" value="1.0" lower="0.0"/>
                  </rate>
                </strictClockBranchRates>"#};
            (block, "strictClockBranchRates")
        }
        Clock::Ucln => {
            let block = formatdoc! {r#"
                <discretizedBranchRates id="branchRates">
                  <treeModel idref="treeModel"/>
                  <distribution>
                    <logNormalDistributionModel meanInRealSpace="true">
                      <mean>
                        <parameter id="ucld.mean" value="1.0" lower="0.0"/>
                      </mean>
                      <stdev>
                        <parameter id="ucld.stdev" value="0.3333" lower="0.0"/>
                      </stdev>
                    </logNormalDistributionModel>
                  </distribution>
                  <rateCategories>
                    <parameter id="branchRates.categories"/>
                  </rateCategories>
                </discretizedBranchRates>"#};
            (block, "discretizedBranchRates")
        }
    }
}

/// Coalescent model block, its likelihood id for the prior, and the log
/// columns of its parameters.
fn coalescent_block(model: &GtrModel) -> (String, &'static str, String) {
    match model.coalescent {
        Coalescent::Constant => {
            let block = formatdoc! {r#"
                <constantSize id="demographic" units="years">
                  <populationSize>
                    <parameter id="demographic.popSize" value="10.0" lower="0.0"/>
                  </populationSize>
                </constantSize>

                <coalescentLikelihood id="coalescent">
                  <model>
                    <constantSize idref="demographic"/>
                  </model>
                  <populationTree>
                    <treeModel idref="treeModel"/>
                  </populationTree>
                </coalescentLikelihood>"#};
            (block, "coalescentLikelihood", r#"<parameter idref="demographic.popSize"/>"#.to_string())
        }
        Coalescent::Exponential => {
            let block = formatdoc! {r#"
                <exponentialGrowth id="demographic" units="years">
                  <populationSize>
                    <parameter id="demographic.popSize" value="10.0" lower="0.0"/>
                  </populationSize>
                  <growthRate>
                    <parameter id="demographic.growthRate" value="0.0"/>
                  </growthRate>
                </exponentialGrowth>

                <coalescentLikelihood id="coalescent">
                  <model>
                    <exponentialGrowth idref="demographic"/>
                  </model>
                  <populationTree>
                    <treeModel idref="treeModel"/>
                  </populationTree>
                </coalescentLikelihood>"#};
            let columns = formatdoc! {r#"
                <parameter idref="demographic.popSize"/>
                <parameter idref="demographic.growthRate"/>"#};
            (block, "coalescentLikelihood", columns)
        }
        Coalescent::Skygrid => {
            // validated upstream, both parameters are present
            let intervals = model.skygrid_intervals.unwrap_or_default();
            let duration = model.skygrid_duration.unwrap_or_default();
            let grid_points = intervals.saturating_sub(1);
            let block = formatdoc! {r#"
                <gmrfSkyGridLikelihood id="skygrid">
                  <populationSizes>
                    <parameter id="skygrid.logPopSize" dimension="{intervals}" value="1.0"/>
                  </populationSizes>
                  <precisionParameter>
                    <parameter id="skygrid.precision" value="0.1" lower="0.0"/>
                  </precisionParameter>
                  <numGridPoints>
                    <parameter id="skygrid.numGridPoints" value="{grid_points}"/>
                  </numGridPoints>
                  <cutOff>
                    <parameter id="skygrid.cutOff" value="{duration}"/>
                  </cutOff>
                  <populationTree>
                    <treeModel idref="treeModel"/>
                  </populationTree>
                </gmrfSkyGridLikelihood>"#};
            let columns = formatdoc! {r#"
                <parameter idref="skygrid.logPopSize"/>
                <parameter idref="skygrid.precision"/>"#};
            (block, "gmrfSkyGridLikelihood", columns)
        }
    }
}

fn tree_model_block() -> String {
    formatdoc! {r#"
        <constantSize id="initialDemo" units="years">
          <populationSize>
            <parameter id="initialDemo.popSize" value="100.0"/>
          </populationSize>
        </constantSize>

        <coalescentSimulator id="startingTree">
          <taxa idref="taxa"/>
          <constantSize idref="initialDemo"/>
        </coalescentSimulator>

        <treeModel id="treeModel">
          <coalescentTree idref="startingTree"/>
          <rootHeight>
            <parameter id="treeModel.rootHeight"/>
          </rootHeight>
          <nodeHeights internalNodes="true">
            <parameter id="treeModel.internalNodeHeights"/>
          </nodeHeights>
          <nodeHeights internalNodes="true" rootNode="true">
            <parameter id="treeModel.allInternalNodeHeights"/>
          </nodeHeights>
        </treeModel>"#}
}

fn tree_operators_block() -> String {
    formatdoc! {r#"
        <subtreeSlide size="1.0" gaussian="true" weight="15">
          <treeModel idref="treeModel"/>
        </subtreeSlide>
        <narrowExchange weight="15">
          <treeModel idref="treeModel"/>
        </narrowExchange>
        <wideExchange weight="3">
          <treeModel idref="treeModel"/>
        </wideExchange>
        <wilsonBalding weight="3">
          <treeModel idref="treeModel"/>
        </wilsonBalding>
        <scaleOperator scaleFactor="0.75" weight="3">
          <parameter idref="treeModel.rootHeight"/>
        </scaleOperator>
        <uniformOperator weight="30">
          <parameter idref="treeModel.internalNodeHeights"/>
        </uniformOperator>"#}
}

// ----------------------------------------------------------------------------
// Control Files

/// Render the control file of the GTR single-partition analysis.
pub fn render_gtr_single_partition(
    samples: &[Sample],
    model: &GtrModel,
    mcmc: &Mcmc,
) -> Result<String, Report> {
    model.validate()?;
    mcmc.validate()?;

    let taxa = taxa_block(samples.iter().map(|s| (s.id.as_str(), s.time, s.time_uncertainty)));
    let alignment =
        alignment_block("alignment", samples.iter().map(|s| (s.id.as_str(), s.seq.as_str())));
    let frequencies = frequencies_block(model.base_freq);
    let (clock, branch_rates_element) = clock_block(model.clock);
    let (coalescent, coalescent_id, coalescent_columns) = coalescent_block(model);

    let site_gamma = model.site_gamma;
    let invariant = if model.site_invariant {
        formatdoc! {r#"
            <proportionInvariant>
              <parameter id="siteModel.pInv" value="0.1" lower="0.0" upper="1.0"/>
            </proportionInvariant>"#}
    } else {
        String::new()
    };

    let n_generations = mcmc.n_generations;
    let sample_every = mcmc.sample_every;
    let print_every = mcmc.print_every();

    Ok(formatdoc! {r#"
        <?xml version="1.0" standalone="yes"?>
        <beast version="1.10.4">

        <taxa id="taxa">
        {taxa}
        </taxa>

        {alignment}

        <patterns id="patterns" from="1" strip="false">
          <alignment idref="alignment"/>
        </patterns>

        {tree_model}

        {coalescent}

        {clock}

        <gtrModel id="gtr">
          <frequencies>
        {frequencies}
          </frequencies>
          <rateAC><parameter id="gtr.ac" value="1.0" lower="0.0"/></rateAC>
          <rateAG><parameter id="gtr.ag" value="1.0" lower="0.0"/></rateAG>
          <rateAT><parameter id="gtr.at" value="1.0" lower="0.0"/></rateAT>
          <rateCG><parameter id="gtr.cg" value="1.0" lower="0.0"/></rateCG>
          <rateGT><parameter id="gtr.gt" value="1.0" lower="0.0"/></rateGT>
        </gtrModel>

        <siteModel id="siteModel">
          <substitutionModel>
            <gtrModel idref="gtr"/>
          </substitutionModel>
          <gammaShape gammaCategories="{site_gamma}">
            <parameter id="siteModel.alpha" value="0.5" lower="0.0"/>
          </gammaShape>
        {invariant}
        </siteModel>

        <treeDataLikelihood id="treeLikelihood" useAmbiguities="false">
          <partition>
            <patterns idref="patterns"/>
            <siteModel idref="siteModel"/>
          </partition>
          <treeModel idref="treeModel"/>
          <{branch_rates_element} idref="branchRates"/>
        </treeDataLikelihood>

        <operators id="operators" optimizationSchedule="default">
          <scaleOperator scaleFactor="0.75" weight="1">
            <parameter idref="siteModel.alpha"/>
          </scaleOperator>
          <scaleOperator scaleFactor="0.75" weight="1">
            <parameter idref="gtr.ac"/>
          </scaleOperator>
          <scaleOperator scaleFactor="0.75" weight="1">
            <parameter idref="gtr.gt"/>
          </scaleOperator>
        {tree_operators}
        </operators>

        <mcmc id="mcmc" chainLength="{n_generations}" autoOptimize="true" operatorAnalysis="{ops_file}">
          <posterior id="posterior">
            <prior id="prior">
              <{coalescent_id} idref="{coalescent_ref}"/>
            </prior>
            <likelihood id="likelihood">
              <treeDataLikelihood idref="treeLikelihood"/>
            </likelihood>
          </posterior>
          <operators idref="operators"/>

          <log id="screenLog" logEvery="{print_every}">
            <column label="posterior" dp="4" width="12">
              <posterior idref="posterior"/>
            </column>
            <column label="likelihood" dp="4" width="12">
              <likelihood idref="likelihood"/>
            </column>
            <column label="rootHeight" sf="6" width="12">
              <parameter idref="treeModel.rootHeight"/>
            </column>
          </log>

          <log id="fileLog" logEvery="{sample_every}" fileName="{log_file}" overwrite="false">
            <posterior idref="posterior"/>
            <prior idref="prior"/>
            <likelihood idref="likelihood"/>
            <parameter idref="treeModel.rootHeight"/>
            <parameter idref="siteModel.alpha"/>
        {coalescent_columns}
          </log>

          <logTree id="treeFileLog" logEvery="{sample_every}" nexusFormat="true" fileName="{trees_file}" sortTranslationTable="true">
            <treeModel idref="treeModel"/>
            <trait name="rate" tag="rate">
              <{branch_rates_element} idref="branchRates"/>
            </trait>
            <posterior idref="posterior"/>
          </logTree>
        </mcmc>

        <report>
          <property name="timer">
            <mcmc idref="mcmc"/>
          </property>
        </report>
        </beast>
        "#,
        tree_model = tree_model_block(),
        tree_operators = tree_operators_block(),
        coalescent_ref = match model.coalescent {
            Coalescent::Skygrid => "skygrid",
            _ => "coalescent",
        },
        ops_file = OPS_FILE,
        log_file = LOG_FILE,
        trees_file = TREES_FILE,
    })
}

/// Render the control file of the site-heterogeneous HKY analysis.
///
/// Coding and non-coding partitions get independent HKY substitution and
/// site models over one shared tree and relaxed clock.
pub fn render_site_heterogeneous_hky(
    samples: &[PartitionedSample],
    mcmc: &Mcmc,
) -> Result<String, Report> {
    mcmc.validate()?;

    let taxa = taxa_block(samples.iter().map(|s| (s.id.as_str(), s.time, s.time_uncertainty)));
    let alignment_orf = alignment_block(
        "alignment.orf",
        samples.iter().map(|s| (s.id.as_str(), s.seq_orf.as_str())),
    );
    let alignment_nc =
        alignment_block("alignment.nc", samples.iter().map(|s| (s.id.as_str(), s.seq_nc.as_str())));
    let (clock, branch_rates_element) = clock_block(Clock::Ucln);

    let partition_models = ["orf", "nc"]
        .iter()
        .map(|partition| {
            formatdoc! {r#"
                <HKYModel id="hky.{partition}">
                  <frequencies>
                    <frequencyModel dataType="nucleotide">
                      <alignment idref="alignment.{partition}"/>
                      <frequencies>
                        <parameter id="frequencies.{partition}" dimension="4"/>
                      </frequencies>
                    </frequencyModel>
                  </frequencies>
                  <kappa>
                    <parameter id="kappa.{partition}" value="2.0" lower="0.0"/>
                  </kappa>
                </HKYModel>

                <siteModel id="siteModel.{partition}">
                  <substitutionModel>
                    <HKYModel idref="hky.{partition}"/>
                  </substitutionModel>
                  <gammaShape gammaCategories="4">
                    <parameter id="siteModel.{partition}.alpha" value="0.5" lower="0.0"/>
                  </gammaShape>
                </siteModel>"#}
        })
        .join("\n\n");

    let n_generations = mcmc.n_generations;
    let sample_every = mcmc.sample_every;
    let print_every = mcmc.print_every();

    Ok(formatdoc! {r#"
        <?xml version="1.0" standalone="yes"?>
        <beast version="1.10.4">

        <taxa id="taxa">
        {taxa}
        </taxa>

        {alignment_orf}

        {alignment_nc}

        <patterns id="patterns.orf" from="1" strip="false">
          <alignment idref="alignment.orf"/>
        </patterns>

        <patterns id="patterns.nc" from="1" strip="false">
          <alignment idref="alignment.nc"/>
        </patterns>

        {tree_model}

        <constantSize id="demographic" units="years">
          <populationSize>
            <parameter id="demographic.popSize" value="10.0" lower="0.0"/>
          </populationSize>
        </constantSize>

        <coalescentLikelihood id="coalescent">
          <model>
            <constantSize idref="demographic"/>
          </model>
          <populationTree>
            <treeModel idref="treeModel"/>
          </populationTree>
        </coalescentLikelihood>

        {clock}

        {partition_models}

        <treeDataLikelihood id="treeLikelihood" useAmbiguities="false">
          <partition>
            <patterns idref="patterns.orf"/>
            <siteModel idref="siteModel.orf"/>
          </partition>
          <partition>
            <patterns idref="patterns.nc"/>
            <siteModel idref="siteModel.nc"/>
          </partition>
          <treeModel idref="treeModel"/>
          <{branch_rates_element} idref="branchRates"/>
        </treeDataLikelihood>

        <operators id="operators" optimizationSchedule="default">
          <scaleOperator scaleFactor="0.75" weight="1">
            <parameter idref="kappa.orf"/>
          </scaleOperator>
          <scaleOperator scaleFactor="0.75" weight="1">
            <parameter idref="kappa.nc"/>
          </scaleOperator>
          <scaleOperator scaleFactor="0.75" weight="3">
            <parameter idref="demographic.popSize"/>
          </scaleOperator>
        {tree_operators}
        </operators>

        <mcmc id="mcmc" chainLength="{n_generations}" autoOptimize="true" operatorAnalysis="{ops_file}">
          <posterior id="posterior">
            <prior id="prior">
              <coalescentLikelihood idref="coalescent"/>
            </prior>
            <likelihood id="likelihood">
              <treeDataLikelihood idref="treeLikelihood"/>
            </likelihood>
          </posterior>
          <operators idref="operators"/>

          <log id="screenLog" logEvery="{print_every}">
            <column label="posterior" dp="4" width="12">
              <posterior idref="posterior"/>
            </column>
            <column label="likelihood" dp="4" width="12">
              <likelihood idref="likelihood"/>
            </column>
          </log>

          <log id="fileLog" logEvery="{sample_every}" fileName="{log_file}" overwrite="false">
            <posterior idref="posterior"/>
            <prior idref="prior"/>
            <likelihood idref="likelihood"/>
            <parameter idref="treeModel.rootHeight"/>
            <parameter idref="kappa.orf"/>
            <parameter idref="kappa.nc"/>
            <parameter idref="demographic.popSize"/>
          </log>

          <logTree id="treeFileLog" logEvery="{sample_every}" nexusFormat="true" fileName="{trees_file}" sortTranslationTable="true">
            <treeModel idref="treeModel"/>
            <trait name="rate" tag="rate">
              <{branch_rates_element} idref="branchRates"/>
            </trait>
            <posterior idref="posterior"/>
          </logTree>
        </mcmc>

        <report>
          <property name="timer">
            <mcmc idref="mcmc"/>
          </property>
        </report>
        </beast>
        "#,
        tree_model = tree_model_block(),
        tree_operators = tree_operators_block(),
        ops_file = OPS_FILE,
        log_file = LOG_FILE,
        trees_file = TREES_FILE,
    })
}

#[cfg(test)]
mod tests;

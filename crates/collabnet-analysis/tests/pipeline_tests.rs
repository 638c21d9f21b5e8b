//! End-to-end tests: index -> relation table -> yearly statistics -> artifacts

use collabnet_analysis::{
    publish, AnalysisConfig, AnalysisError, ArtifactKind, NameQuery, RunReport, TemporalAggregator,
    TemporalRelationBuilder,
};
use collabnet_domain::traits::{ArtifactSink, RelationCheckpoint};
use collabnet_domain::{RelationTable, TemporalRelationRow, YearRange};
use collabnet_render::{PngRenderer, RenderConfig};
use collabnet_store::{CsvRelationTable, DirectorySink, PersonRecord, PublicationRecord, SqliteAuthorIndex};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn person(key: &str, name: &str) -> PersonRecord {
    PersonRecord {
        key: key.to_string(),
        name: name.to_string(),
        aliases: Vec::new(),
    }
}

fn publication(key: &str, year: i32, authors: &[&str]) -> PublicationRecord {
    PublicationRecord {
        key: key.to_string(),
        title: None,
        year,
        authors: authors.iter().map(|a| a.to_string()).collect(),
    }
}

/// Bibliography whose cumulative relation is the four-author scenario table
fn scenario_index() -> SqliteAuthorIndex {
    let mut index = SqliteAuthorIndex::new(":memory:").unwrap();
    index
        .import(
            &[person("k/a", "A"), person("k/b", "B"), person("k/c", "C"), person("k/d", "D")],
            &[
                publication("p1", 2000, &["A", "B"]),
                publication("p2", 2000, &["A", "C"]),
                publication("p3", 2001, &["A", "D"]),
                publication("p4", 2001, &["B", "D"]),
            ],
        )
        .unwrap();
    index
}

fn row(author: &str, cells: &[(i32, &[&str])]) -> TemporalRelationRow {
    let mut row = TemporalRelationRow::new(author);
    for (year, names) in cells {
        row.set(*year, names.iter().map(|n| n.to_string()).collect());
    }
    row
}

#[derive(Default)]
struct MemorySink(BTreeMap<String, Vec<u8>>);

impl ArtifactSink for MemorySink {
    type Error = String;

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[test]
fn test_scenario_from_index_to_graphs() {
    let dir = TempDir::new().unwrap();
    let config = AnalysisConfig::default();
    let range = YearRange::new(2000, 2001);

    let builder = TemporalRelationBuilder::new(config.clone());
    let resolution = builder
        .resolve(["A", "B", "C", "D", "Nobody"], &scenario_index())
        .unwrap();
    assert_eq!(resolution.unmatched, vec!["Nobody"]);

    let mut checkpoint = CsvRelationTable::new(dir.path().join("temporal_rels.csv"), &config.delimiter);
    let table = builder
        .build_and_checkpoint(&resolution.authors, range, &mut checkpoint)
        .unwrap();

    assert_eq!(table.row("A").unwrap().encode_cell(2000, "::"), "B::C");
    assert_eq!(table.row("A").unwrap().encode_cell(2001, "::"), "B::C::D");
    assert_eq!(table.row("D").unwrap().encode_cell(2000, "::"), "");
    assert_eq!(table.row("D").unwrap().encode_cell(2001, "::"), "A::B");

    // A later run starts from the checkpoint and sees the same graphs
    let reloaded = checkpoint.load().unwrap();
    assert_eq!(reloaded, table);

    let report = TemporalAggregator::new(config).run_range(&reloaded, range).unwrap();
    let (_, g2000) = &report.graphs[0];
    let (_, g2001) = &report.graphs[1];

    assert_eq!(g2000.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    assert_eq!(g2000.edges().collect::<Vec<_>>(), vec![("A", "B"), ("A", "C")]);
    assert_eq!(g2001.nodes().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    assert_eq!(
        g2001.edges().collect::<Vec<_>>(),
        vec![("A", "B"), ("A", "C"), ("A", "D"), ("B", "D")]
    );
}

#[test]
fn test_publish_names_every_artifact() {
    let range = YearRange::new(2000, 2002);
    let cells: Vec<(i32, &[&str])> = range.years().map(|y| (y, &["B", "C"][..])).collect();
    let mut table = RelationTable::new(range);
    table.push(row("A", &cells));

    let report = TemporalAggregator::new(AnalysisConfig::default())
        .run_range(&table, range)
        .unwrap();

    let renderer = PngRenderer::new(RenderConfig::compact()).unwrap();
    let mut sink = MemorySink::default();
    let artifacts = publish(&report, Some("test"), &renderer, &mut sink).unwrap();

    let names: Vec<&str> = sink.0.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "test_assortativity_2000.png",
            "test_assortativity_2001.png",
            "test_assortativity_2002.png",
            "test_degree_dist_2000.png",
            "test_degree_dist_2001.png",
            "test_degree_dist_2002.png",
            "test_gamma_progression_2000-2002.png",
            "test_size_progression_2000-2002.png",
        ]
    );
    assert_eq!(artifacts.len(), 8);
    assert_eq!(artifacts[0].kind, ArtifactKind::DegreeDistribution);
    assert_eq!(artifacts[7].kind, ArtifactKind::SizeProgression);

    let run = RunReport::new(&report, Vec::new(), &artifacts);
    assert_eq!(run.years.len(), 3);
    assert_eq!(run.artifacts.len(), 8);
}

#[test]
fn test_publish_to_directory() {
    let dir = TempDir::new().unwrap();
    let range = YearRange::new(2000, 2000);
    let mut table = RelationTable::new(range);
    table.push(row("A", &[(2000, &["B", "C"])]));

    let report = TemporalAggregator::new(AnalysisConfig::default())
        .run_range(&table, range)
        .unwrap();

    let mut sink = DirectorySink::new(dir.path().join("charts")).unwrap();
    publish(&report, None, &PngRenderer::default(), &mut sink).unwrap();

    assert!(dir.path().join("charts/degree_dist_2000.png").is_file());
    assert!(dir.path().join("charts/assortativity_2000.png").is_file());
    assert!(dir.path().join("charts/gamma_progression_2000-2000.png").is_file());
    assert_eq!(sink.written().len(), 4);
}

#[test]
fn test_regular_year_fails_whole_run() {
    let range = YearRange::new(2000, 2001);
    let mut table = RelationTable::new(range);
    table.push(row("A", &[(2000, &["B", "C"]), (2001, &["B", "C"])]));
    table.push(row("B", &[(2001, &["C"])]));

    let result = TemporalAggregator::new(AnalysisConfig::default()).run_range(&table, range);
    assert!(matches!(result, Err(AnalysisError::Statistics { year: 2001, .. })));
}

#[test]
fn test_profile_key_disambiguates() {
    let mut index = SqliteAuthorIndex::new(":memory:").unwrap();
    index
        .import(
            &[person("k/lee1", "Lee"), person("k/lee2", "Lee")],
            &[publication("p1", 2000, &["Lee", "Kim"])],
        )
        .unwrap();

    let builder = TemporalRelationBuilder::new(AnalysisConfig::default());
    let report = builder
        .resolve([NameQuery::new("Lee").with_key("k/lee2")], &index)
        .unwrap();
    assert_eq!(report.authors[0].key.as_str(), "k/lee2");
}

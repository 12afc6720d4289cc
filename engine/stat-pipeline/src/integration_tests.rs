//! End-to-end runs over team page fixtures

use tempfile::TempDir;

use crate::config::{PipelineConfig, FINAL_HEADERS};
use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::sink::{CsvDirSink, MemorySink};
use crate::table::Table;

/// Render a stat table the way team pages do: a decorative header row, a
/// ranker column and the whole block hidden in an HTML comment
fn commented_table(id: &str, keys: &[&str], rows: &[&[&str]], footer: &[&str]) -> String {
    let mut html = format!("<div id=\"all_{id}\">\n  <!--\n<table id=\"{id}\">\n<thead>\n");
    html.push_str("<tr><th data-stat=\"header_stats\" colspan=\"4\">Stats</th></tr>\n<tr>");
    html.push_str("<th data-stat=\"ranker\">Rk</th>");
    for key in keys {
        html.push_str(&format!("<th data-stat=\"{key}\">{key}</th>"));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for (rank, row) in rows.iter().enumerate() {
        html.push_str(&format!("<tr><th data-stat=\"ranker\">{}</th>", rank + 1));
        for (key, value) in keys.iter().zip(row.iter()) {
            html.push_str(&format!("<td data-stat=\"{key}\">{value}</td>"));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n<tfoot><tr><th data-stat=\"ranker\"></th>");
    for value in footer {
        html.push_str(&format!("<td>{value}</td>"));
    }
    html.push_str("</tr></tfoot>\n</table>\n-->\n</div>\n");
    html
}

fn page(tables: &[String]) -> String {
    format!("<html>\n<body>\n{}</body>\n</html>\n", tables.concat())
}

fn doe_page() -> String {
    page(&[
        commented_table(
            "passing",
            &["name_display", "pos", "games", "pass_yds", "pass_td", "pass_int"],
            &[&["J.Doe", "QB", "17", "300", "2", "1"]],
            &["Team Total", "", "17", "600", "4", "2"],
        ),
        commented_table(
            "rushing_and_receiving",
            &["name_display", "pos", "games", "rush_yds", "rush_td", "rec", "rec_yds", "rec_td", "fumbles"],
            &[&["J.Doe", "QB", "17", "50", "0", "0", "0", "0", "0"]],
            &["Team Total", "", "17", "100", "1", "3", "30", "1", "1"],
        ),
    ])
}

fn chiefs_page() -> String {
    page(&[
        commented_table(
            "passing",
            &[
                "name_display", "age", "pos", "games", "games_started", "pass_cmp", "pass_att",
                "pass_yds", "pass_td", "pass_int", "pass_1d", "pass_long", "pass_sacked",
                "pass_sacked_yds",
            ],
            &[
                &["P.Mahomes", "28", "QB", "16", "16", "401", "581", "4183", "27", "14", "200", "67", "27", "155"],
                &["C.Wentz", "31", "QB", "2", "1", "20", "30", "200", "1", "0", "10", "40", "3", "20"],
            ],
            &["Team Total", "", "", "17", "", "421", "611", "4383", "28", "14", "210", "67", "30", "175"],
        ),
        commented_table(
            "rushing_and_receiving",
            &[
                "name_display", "age", "pos", "games", "games_started", "rush_att", "rush_yds",
                "rush_td", "rush_1d", "rush_long", "targets", "rec", "rec_yds", "rec_td", "rec_1d",
                "rec_long", "touches", "fumbles",
            ],
            &[
                &["I.Pacheco", "24", "RB", "13", "13", "205", "935", "7", "50", "41", "33", "24", "244", "2", "10", "24", "229", "1"],
                &["P.Mahomes", "28", "QB", "16", "16", "60", "389", "2", "30", "34", "", "", "", "", "", "", "60", "2"],
            ],
            &["Team Total", "", "", "17", "", "265", "1324", "9", "80", "41", "33", "24", "244", "2", "10", "24", "289", "3"],
        ),
    ])
}

fn two_field_config() -> PipelineConfig {
    PipelineConfig {
        percent_fields: vec!["pass_yds".to_string(), "rush_yds".to_string()],
        ..Default::default()
    }
}

fn row_of(table: &Table, player: &str) -> usize {
    (0..table.rows.len())
        .find(|&i| table.cell(i, "player") == Some(player))
        .unwrap_or_else(|| panic!("{player} missing from {}", table.name))
}

#[test]
fn test_single_player_end_to_end() {
    let mut sink = MemorySink::new();
    let pipeline = Pipeline::new(two_field_config()).unwrap();
    let out = pipeline.run(&doe_page(), "KC", "2024", &mut sink).unwrap();

    let merged = sink.get("parsed_tables/KC_2024_merged").unwrap();
    assert_eq!(merged.rows.len(), 1);
    assert_eq!(merged.cell(0, "pass_yds"), Some("300"));
    assert_eq!(merged.cell(0, "rush_yds"), Some("50"));

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.cell(0, "player"), Some("J.Doe"));
    assert_eq!(out.cell(0, "pass_yds%"), Some("50.00%"));
    assert_eq!(out.cell(0, "rush_yds%"), Some("50.00%"));
    assert_eq!(out.cell(0, "year"), Some("2024"));
    assert_eq!(out.cell(0, "std_pts"), Some("23.00"));
    assert_eq!(out.cell(0, "order"), Some("1"));
    assert_eq!(out.footer_cell("player"), Some("KC Totals"));
    assert_eq!(out.footer_cell("year"), Some("2024"));
}

#[test]
fn test_sink_receives_every_stage_in_order() {
    let mut sink = MemorySink::new();
    let pipeline = Pipeline::new(two_field_config()).unwrap();
    let out = pipeline.run(&doe_page(), "KC", "2024", &mut sink).unwrap();

    assert_eq!(
        sink.destinations(),
        vec![
            "parsed_tables/KC_2024_passing",
            "parsed_tables/KC_2024_rushing_and_receiving",
            "parsed_tables/KC_2024_merged",
            "final/KC_2024",
        ]
    );
    assert_eq!(sink.get("final/KC_2024"), Some(&out));

    let passing = sink.get("parsed_tables/KC_2024_passing").unwrap();
    assert_eq!(passing.headers, vec!["player", "pos", "g", "pass_yds", "pass_td", "pass_int"]);
    assert_eq!(passing.footer[0], "Team Total");
}

#[test]
fn test_final_schema_and_default_fill() {
    let mut sink = MemorySink::new();
    let pipeline = Pipeline::new(two_field_config()).unwrap();
    let out = pipeline.run(&doe_page(), "KC", "2024", &mut sink).unwrap();

    assert_eq!(out.headers, FINAL_HEADERS);
    assert_eq!(out.cell(0, "projection"), Some(""));
    assert_eq!(out.cell(0, "pos_rank"), Some(""));
    assert_eq!(out.cell(0, "age"), Some("0"));
    assert_eq!(out.cell(0, "rec_yds%"), Some("0"));
    assert_eq!(out.cell(0, "rec"), Some("0"));
}

#[test]
fn test_full_team_season() {
    let mut sink = MemorySink::new();
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let out = pipeline.run(&chiefs_page(), "KC", "2023", &mut sink).unwrap();

    let players: Vec<_> = (0..3).map(|i| out.cell(i, "player").unwrap()).collect();
    assert_eq!(players, vec!["P.Mahomes", "C.Wentz", "I.Pacheco"]);

    let mahomes = row_of(&out, "P.Mahomes");
    assert_eq!(out.cell(mahomes, "pass_yds%"), Some("95.44%"));
    assert_eq!(out.cell(mahomes, "times sacked"), Some("27"));
    assert_eq!(out.cell(mahomes, "times sacked%"), Some("90.00%"));
    assert_eq!(out.cell(mahomes, "rush_yds"), Some("389"));
    assert_eq!(out.cell(mahomes, "targets"), Some("0"));
    assert_eq!(out.cell(mahomes, "std_pts"), Some("296.22"));
    assert_eq!(out.cell(mahomes, "std_ppg"), Some("18.51"));
    assert_eq!(out.cell(mahomes, "order"), Some("1"));

    let wentz = row_of(&out, "C.Wentz");
    assert_eq!(out.cell(wentz, "rush_yds%"), Some("0.00%"));
    assert_eq!(out.cell(wentz, "std_pts"), Some("12.00"));
    assert_eq!(out.cell(wentz, "order"), Some("3"));

    let pacheco = row_of(&out, "I.Pacheco");
    assert_eq!(out.cell(pacheco, "rush_yds%"), Some("70.62%"));
    assert_eq!(out.cell(pacheco, "rush_att%"), Some("77.36%"));
    assert_eq!(out.cell(pacheco, "std_pts"), Some("170.90"));
    assert_eq!(out.cell(pacheco, "half_ppr_pts"), Some("182.90"));
    assert_eq!(out.cell(pacheco, "ppr_pts"), Some("194.90"));
    assert_eq!(out.cell(pacheco, "half_ppr_ppg"), Some("14.07"));
    assert_eq!(out.cell(pacheco, "ppr_ppg"), Some("14.07"));
    assert_eq!(out.cell(pacheco, "order"), Some("2"));

    assert_eq!(out.footer_cell("player"), Some("KC Totals"));
    assert_eq!(out.footer_cell("rush_yds"), Some("1324"));
}

#[test]
fn test_full_ppr_basis_changes_only_ppr_ppg() {
    let mut config = PipelineConfig::default();
    config.scoring.ppr_ppg_basis = crate::config::PprPpgBasis::FullPpr;

    let mut sink = MemorySink::new();
    let pipeline = Pipeline::new(config).unwrap();
    let out = pipeline.run(&chiefs_page(), "KC", "2023", &mut sink).unwrap();

    let pacheco = row_of(&out, "I.Pacheco");
    assert_eq!(out.cell(pacheco, "half_ppr_ppg"), Some("14.07"));
    assert_eq!(out.cell(pacheco, "ppr_ppg"), Some("14.99"));
}

#[test]
fn test_csv_output_layout() {
    let temp_dir = TempDir::new().unwrap();
    let mut sink = CsvDirSink::new(temp_dir.path());
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    pipeline.run(&chiefs_page(), "KC", "2023", &mut sink).unwrap();

    for name in ["KC_2023_passing", "KC_2023_rushing_and_receiving", "KC_2023_merged"] {
        assert!(temp_dir.path().join("parsed_tables").join(format!("{name}.csv")).exists());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(temp_dir.path().join("final/KC_2023.csv"))
        .unwrap();
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].iter().collect::<Vec<_>>(), FINAL_HEADERS);
    assert_eq!(&records[4][3], "KC Totals");
    assert_eq!(&records[4][0], "2023");
}

#[test]
fn test_zero_team_total_aborts_task() {
    let page = page(&[commented_table(
        "passing",
        &["name_display", "pos", "games", "pass_yds", "pass_td", "pass_int"],
        &[&["J.Doe", "QB", "17", "0", "0", "0"]],
        &["Team Total", "", "17", "0", "0", "0"],
    )]);
    let config = PipelineConfig { percent_fields: vec!["pass_yds".to_string()], ..Default::default() };

    let mut sink = MemorySink::new();
    let pipeline = Pipeline::new(config).unwrap();
    let err = pipeline.run(&page, "NYJ", "2020", &mut sink).unwrap_err();

    assert!(matches!(err, PipelineError::Task { .. }));
    assert_eq!(err.field(), Some("pass_yds"));
    assert!(err.to_string().contains("NYJ 2020"));
    assert!(sink.get("final/NYJ_2020").is_none());
}

#[test]
fn test_runs_share_no_state() {
    let pipeline = Pipeline::new(two_field_config()).unwrap();
    let mut first = MemorySink::new();
    let mut second = MemorySink::new();

    let a = pipeline.run(&doe_page(), "KC", "2024", &mut first).unwrap();
    let _ = pipeline.run("<html></html>", "BUF", "2024", &mut second);
    let b = pipeline.run(&doe_page(), "KC", "2024", &mut second).unwrap();

    assert_eq!(a, b);
}

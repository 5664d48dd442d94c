//! Snapshot tests using the insta crate.
//!
//! The wire shape of the extraction models is a contract with rendering
//! clients (camelCase keys, untagged cell values, per-series colors), so
//! it is pinned here with inline snapshots.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{graph_marker, table_marker};
use chatviz::process;

#[test]
fn snapshot_table_model_serialization() {
    let result = process(&table_marker(
        r#"{"headers":["Name","Score"],"rows":[["alpha",10]]}"#,
    ));
    insta::assert_json_snapshot!(result.tables[0], @r##"
    {
      "headers": [
        "Name",
        "Score"
      ],
      "rows": [
        [
          "alpha",
          10.0
        ]
      ]
    }
    "##);
}

#[test]
fn snapshot_chart_model_serialization() {
    let result = process(&graph_marker(
        r#"{"chartType":"line","series":[{"name":"A","data":[1,2]}],"xAxis":{"data":["x","y"]}}"#,
    ));
    insta::assert_json_snapshot!(result.charts[0], @r##"
    {
      "chartType": "line",
      "title": null,
      "categoryLabels": [
        "x",
        "y"
      ],
      "series": [
        {
          "name": "A",
          "values": [
            1.0,
            2.0
          ]
        }
      ],
      "xAxisLabel": "",
      "yAxisLabel": "",
      "colorAssignment": {
        "A": "#8884d8"
      }
    }
    "##);
}

#[test]
fn snapshot_pipeline_result_serialization() {
    let text = "Revenue grew.\n%%TABLE_JSON%%{\"headers\":[\"Q\",\"Rev\"],\"rows\":[[\"Q1\",\"10\"]]}%%END_TABLE%%\nThanks.";
    insta::assert_json_snapshot!(process(text), @r##"
    {
      "cleanedText": "Revenue grew.\n\nThanks.",
      "tables": [
        {
          "headers": [
            "Q",
            "Rev"
          ],
          "rows": [
            [
              "Q1",
              "10"
            ]
          ]
        }
      ],
      "charts": [],
      "errors": []
    }
    "##);
}

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::process::Command;

pub const TS_FILE_HEADER: &str = "/* eslint-disable */
// This file was automatically generated and should not be edited.

";

pub const SCHEMA_JSON: &str = r#"{
  "data": {
    "__schema": {
      "types": [
        {
          "kind": "OBJECT",
          "name": "Query",
          "description": null,
          "fields": [
            {
              "name": "viewer",
              "description": "Access to fields relevant to a consumer of the application",
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "OBJECT", "name": "Viewer", "ofType": null } }
            },
            {
              "name": "user",
              "description": null,
              "type": { "kind": "OBJECT", "name": "User", "ofType": null }
            },
            {
              "name": "search",
              "description": null,
              "type": {
                "kind": "NON_NULL",
                "name": null,
                "ofType": {
                  "kind": "LIST",
                  "name": null,
                  "ofType": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "UNION", "name": "SearchResult", "ofType": null } }
                }
              }
            },
            {
              "name": "node",
              "description": null,
              "type": { "kind": "INTERFACE", "name": "Node", "ofType": null }
            },
            {
              "name": "count",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "Int", "ofType": null } }
            },
            {
              "name": "label",
              "description": null,
              "type": { "kind": "SCALAR", "name": "String", "ofType": null }
            },
            {
              "name": "role",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "ENUM", "name": "Role", "ofType": null } }
            },
            {
              "name": "createdAt",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "DateTime", "ofType": null } }
            }
          ]
        },
        {
          "kind": "OBJECT",
          "name": "Viewer",
          "description": null,
          "fields": [
            {
              "name": "id",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } }
            },
            {
              "name": "user",
              "description": "The user associated with the current viewer. Use this field to get info\nabout current viewer and access any records associated w/ their account.",
              "type": { "kind": "OBJECT", "name": "User", "ofType": null }
            }
          ]
        },
        {
          "kind": "OBJECT",
          "name": "User",
          "description": null,
          "fields": [
            {
              "name": "id",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } }
            },
            {
              "name": "name",
              "description": "Display name of the user.",
              "type": { "kind": "SCALAR", "name": "String", "ofType": null }
            },
            {
              "name": "age",
              "description": null,
              "type": { "kind": "SCALAR", "name": "Int", "ofType": null }
            },
            {
              "name": "organization",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "OBJECT", "name": "Organization", "ofType": null } }
            }
          ]
        },
        {
          "kind": "OBJECT",
          "name": "Organization",
          "description": null,
          "fields": [
            {
              "name": "id",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } }
            },
            {
              "name": "title",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "String", "ofType": null } }
            }
          ]
        },
        {
          "kind": "INTERFACE",
          "name": "Node",
          "description": null,
          "fields": [
            {
              "name": "id",
              "description": null,
              "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } }
            }
          ],
          "possibleTypes": [{ "name": "User" }, { "name": "Organization" }]
        },
        {
          "kind": "UNION",
          "name": "SearchResult",
          "description": null,
          "possibleTypes": [{ "name": "User" }, { "name": "Organization" }]
        },
        {
          "kind": "ENUM",
          "name": "Role",
          "description": null,
          "enumValues": [{ "name": "ADMIN" }, { "name": "MEMBER" }]
        },
        {
          "kind": "SCALAR",
          "name": "DateTime",
          "description": null
        }
      ]
    }
  }
}"#;

pub fn qtg_command_with_fake_dir() -> (Command, TempDir) {
    let mut cmd = Command::cargo_bin("qtg").unwrap();
    let temp_dir = assert_fs::TempDir::new().unwrap();
    cmd.arg(temp_dir.path());
    cmd.arg("--num-threads=2");
    (cmd, temp_dir)
}

pub fn qtg_command_with_fake_dir_and_schema() -> (Command, TempDir) {
    let (cmd, temp_dir) = qtg_command_with_fake_dir();
    temp_dir
        .child("schema.json")
        .write_str(SCHEMA_JSON)
        .unwrap();
    (cmd, temp_dir)
}

/// Expected file contents: header plus the trimmed body plus final newline.
pub fn expected_file_contents(body: &str) -> String {
    format!("{TS_FILE_HEADER}{}\n", body.trim())
}

pub fn assert_generated(dir: &TempDir, expected_file_name: &str, expected_content: &str) {
    let output = dir.child("__generated__").child(expected_file_name);
    output.assert(predicates::str::diff(expected_file_contents(
        expected_content,
    )));
}

/// The basic outline of a successful compile:
///  * Make a fake dir
///  * Shove in the schema
///  * Write in a single file
///  * Expect a compiled output
pub fn basic_success_assert(
    graphql_content: &str,
    expected_file_name: &str,
    expected_content: &str,
) {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    temp_dir
        .child("file.graphql")
        .write_str(graphql_content)
        .unwrap();
    cmd.assert().success().stderr(predicates::str::is_empty());
    assert_generated(&temp_dir, expected_file_name, expected_content);
}

use crate::helpers::{assert_generated, qtg_command_with_fake_dir_and_schema};
use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::str::is_empty;

fn write_flat_rc(temp_dir: &assert_fs::TempDir) {
    temp_dir
        .child(".qtgrc.json")
        .write_str("{ \"noNamespaces\": true }")
        .unwrap();
}

#[test]
fn flat_mode_prefixes_nested_object_types() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    write_flat_rc(&temp_dir);
    temp_dir
        .child("GetViewer.graphql")
        .write_str(
            "query GetViewer {
  viewer {
    id
  }
}",
        )
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "GetViewer.ts",
        "
export type GetViewerViewer = {
  id: string;
};

export type GetViewerQuery = {
  /**
   * Access to fields relevant to a consumer of the application
   */
  viewer: GetViewerViewer;
};
    ",
    );
}

#[test]
fn flat_mode_keeps_primitives_and_leaf_kinds_unprefixed() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    write_flat_rc(&temp_dir);
    temp_dir
        .child("Leaves.graphql")
        .write_str(
            "query Leaves {
  count
  role
  label
}",
        )
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "Leaves.ts",
        "
export type LeavesQuery = {
  count: number;
  role: Role;
  label: string | null;
};
    ",
    );
}

#[test]
fn flat_mode_concatenates_fragment_references() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    write_flat_rc(&temp_dir);
    temp_dir
        .child("UserFields.graphql")
        .write_str("fragment UserFields on User { id }")
        .unwrap();
    temp_dir
        .child("GetUser.graphql")
        .write_str(
            "#import \"./UserFields.graphql\"

query GetUser {
  user {
    ...UserFields
    age
  }
}",
        )
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "UserFields.ts",
        "
export type UserFieldsFragment = {
  id: string;
};
    ",
    );
    assert_generated(
        &temp_dir,
        "GetUser.ts",
        "
import { UserFieldsFragment } from \"__generated__/UserFields\";

export type GetUserUser = {
  age: number | null;
} & UserFieldsFragment;

export type GetUserQuery = {
  user: GetUserUser | null;
};
    ",
    );
}

#[test]
fn flat_mode_prefixes_inline_fragment_names() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    write_flat_rc(&temp_dir);
    temp_dir
        .child("GetNode.graphql")
        .write_str(
            "query GetNode {
  node {
    id
    ... on User {
      name
    }
  }
}",
        )
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "GetNode.ts",
        "
export type GetNodeNodeOnUser = {
  /**
   * Display name of the user.
   */
  name: string | null;
};

export type GetNodeNode = {
  id: string;
} & GetNodeNodeOnUser;

export type GetNodeQuery = {
  node: GetNodeNode | null;
};
    ",
    );
}

#[test]
fn no_namespaces_cli_flag_matches_rc_option() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    cmd.arg("--no-namespaces");
    temp_dir
        .child("Totals.graphql")
        .write_str("query Totals { count }")
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "Totals.ts",
        "
export type TotalsQuery = {
  count: number;
};
    ",
    );
}

#[test]
fn rc_primitive_overrides_map_custom_scalars() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    temp_dir
        .child(".qtgrc.json")
        .write_str("{ \"primitives\": { \"DateTime\": \"string\" } }")
        .unwrap();
    temp_dir
        .child("Stamps.graphql")
        .write_str("query Stamps { createdAt }")
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "Stamps.ts",
        "
export namespace Stamps {
  export type Query = {
    createdAt: string;
  };
}
    ",
    );
}

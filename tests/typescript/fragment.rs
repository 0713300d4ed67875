use crate::helpers::{assert_generated, qtg_command_with_fake_dir_and_schema};
use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::str::is_empty;

const USER_FIELDS_FRAGMENT: &str = "fragment UserFields on User {
  id
  name
}";

const MORE_USER_FIELDS_FRAGMENT: &str = "fragment MoreUserFields on User {
  age
}";

const ORG_FIELDS_FRAGMENT: &str = "fragment OrgFields on Organization {
  title
}";

#[test]
fn compile_operation_with_fragment_spread() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    temp_dir
        .child("UserFields.graphql")
        .write_str(USER_FIELDS_FRAGMENT)
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
export namespace UserFields {
  export type Fragment = {
    id: string;
    /**
     * Display name of the user.
     */
    name: string | null;
  };
}
    ",
    );
    assert_generated(
        &temp_dir,
        "GetUser.ts",
        "
import { UserFields } from \"__generated__/UserFields\";

export namespace GetUser {
  export type User = {
    age: number | null;
  } & UserFields.Fragment;

  export type Query = {
    user: User | null;
  };
}
    ",
    );
}

#[test]
fn compile_spreads_on_one_type_intersect() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    temp_dir
        .child("UserFields.graphql")
        .write_str(USER_FIELDS_FRAGMENT)
        .unwrap();
    temp_dir
        .child("MoreUserFields.graphql")
        .write_str(MORE_USER_FIELDS_FRAGMENT)
        .unwrap();
    temp_dir
        .child("GetUserDetail.graphql")
        .write_str(
            "#import \"./UserFields.graphql\"
#import \"./MoreUserFields.graphql\"

query GetUserDetail {
  user {
    ...UserFields
    ...MoreUserFields
  }
}",
        )
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "GetUserDetail.ts",
        "
import { UserFields } from \"__generated__/UserFields\";
import { MoreUserFields } from \"__generated__/MoreUserFields\";

export namespace GetUserDetail {
  export type User = (UserFields.Fragment & MoreUserFields.Fragment);

  export type Query = {
    user: User | null;
  };
}
    ",
    );
}

#[test]
fn compile_mixed_groups_compose_with_fields() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    temp_dir
        .child("OrgFields.graphql")
        .write_str(ORG_FIELDS_FRAGMENT)
        .unwrap();
    temp_dir
        .child("GetDirectory.graphql")
        .write_str(
            "#import \"./OrgFields.graphql\"

query GetDirectory {
  search {
    __typename
    ... on User {
      age
    }
    ...OrgFields
  }
}",
        )
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "GetDirectory.ts",
        "
import { OrgFields } from \"__generated__/OrgFields\";

export namespace GetDirectory {
  export type SearchResultOnUser = {
    age: number | null;
  };

  export type SearchResult = {
    __typename: string;
  } & (SearchResultOnUser | OrgFields.Fragment);

  export type Query = {
    search: (SearchResult)[];
  };
}
    ",
    );
}

#[test]
fn compile_fragment_spreading_another_fragment() {
    let (mut cmd, temp_dir) = qtg_command_with_fake_dir_and_schema();
    temp_dir
        .child("UserFields.graphql")
        .write_str(USER_FIELDS_FRAGMENT)
        .unwrap();
    temp_dir
        .child("FullUser.graphql")
        .write_str(
            "#import \"./UserFields.graphql\"

fragment FullUser on User {
  age
  ...UserFields
}",
        )
        .unwrap();
    cmd.assert().success().stderr(is_empty());
    assert_generated(
        &temp_dir,
        "FullUser.ts",
        "
import { UserFields } from \"__generated__/UserFields\";

export namespace FullUser {
  export type Fragment = {
    age: number | null;
  } & UserFields.Fragment;
}
    ",
    );
}

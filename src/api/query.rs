//! Query option schemas for the directory endpoints.
//!
//! Each endpoint accepts a fixed set of named, typed options. They can be
//! given either as a typed record (`UserQuery`, ...) or as a dynamic JSON
//! map checked at runtime by [`QuerySchema::validate`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ValidationError;
use crate::error::{Error, Result};

/// Type an option value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    String,
    Boolean,
    Number,
}

impl OptionType {
    pub fn name(&self) -> &'static str {
        match self {
            OptionType::String => "string",
            OptionType::Boolean => "boolean",
            OptionType::Number => "number",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (OptionType::String, Value::String(_))
                | (OptionType::Boolean, Value::Bool(_))
                | (OptionType::Number, Value::Number(_))
        )
    }

    /// Interpret command-line text as a value of this type.
    fn parse(&self, raw: &str) -> Option<Value> {
        match self {
            OptionType::String => Some(Value::String(raw.to_string())),
            OptionType::Boolean => raw.parse::<bool>().ok().map(Value::Bool),
            OptionType::Number => serde_json::from_str::<serde_json::Number>(raw).ok().map(Value::Number),
        }
    }
}

/// Allow-list of options for one endpoint.
#[derive(Debug, PartialEq, Eq)]
pub struct QuerySchema {
    pub name: &'static str,
    pub path: &'static str,
    pub fields: &'static [(&'static str, OptionType)],
}

pub const USERS: QuerySchema = QuerySchema {
    name: "users",
    path: "/api/v2/users/",
    fields: &[
        ("is_vouched", OptionType::Boolean),
        ("username", OptionType::String),
        ("full_name", OptionType::String),
        ("ircname", OptionType::String),
        ("email", OptionType::String),
        ("country", OptionType::String),
        ("region", OptionType::String),
        ("city", OptionType::String),
        ("page", OptionType::Number),
        ("language", OptionType::String),
        ("group", OptionType::String),
        ("skill", OptionType::String),
    ],
};

pub const GROUPS: QuerySchema = QuerySchema {
    name: "groups",
    path: "/api/v2/groups/",
    fields: &[
        ("name", OptionType::String),
        ("curator", OptionType::Number),
        ("functional_area", OptionType::Boolean),
        ("members_can_leave", OptionType::Boolean),
        ("accepting_new_members", OptionType::Boolean),
        ("page", OptionType::Number),
    ],
};

pub const SKILLS: QuerySchema = QuerySchema {
    name: "skills",
    path: "/api/v2/skills/",
    fields: &[("name", OptionType::String), ("page", OptionType::Number)],
};

impl QuerySchema {
    pub fn field_type(&self, key: &str) -> Option<OptionType> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, ty)| *ty)
    }

    /// Check `options` against the allow-list and encode them as query
    /// pairs. Reports every offending key, not just the first.
    pub fn validate(&self, options: &Map<String, Value>) -> Result<Vec<(String, String)>> {
        let mut errors = Vec::new();
        let mut pairs = Vec::with_capacity(options.len());

        for (key, value) in options {
            match self.field_type(key) {
                None => errors.push(ValidationError::new(key.as_str(), "unknown option")),
                Some(ty) if !ty.matches(value) => errors.push(ValidationError::new(
                    key.as_str(),
                    format!("must have type: {}", ty.name()),
                )),
                Some(_) => pairs.push((key.clone(), encode(value))),
            }
        }

        if errors.is_empty() {
            Ok(pairs)
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Build an options map from `key=value` assignments, typing each value
    /// by the schema.
    pub fn parse_assignments<S: AsRef<str>>(&self, assignments: &[S]) -> Result<Map<String, Value>> {
        let mut errors = Vec::new();
        let mut options = Map::new();

        for assignment in assignments {
            let assignment = assignment.as_ref();
            let Some((key, raw)) = assignment.split_once('=') else {
                errors.push(ValidationError::new(assignment, "expected key=value"));
                continue;
            };
            match self.field_type(key) {
                None => errors.push(ValidationError::new(key, "unknown option")),
                Some(ty) => match ty.parse(raw) {
                    Some(value) => {
                        options.insert(key.to_string(), value);
                    }
                    None => errors.push(ValidationError::new(key, format!("must have type: {}", ty.name()))),
                },
            }
        }

        if errors.is_empty() {
            Ok(options)
        } else {
            Err(Error::Validation(errors))
        }
    }
}

fn encode(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A typed query record bound to its endpoint schema.
pub trait Query: Serialize {
    const SCHEMA: &'static QuerySchema;

    /// Options that are set, as a JSON map.
    fn to_options(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
            Ok(_) => Err(Error::validation(Self::SCHEMA.name, "query must serialize to an object")),
            Err(e) => Err(Error::validation(Self::SCHEMA.name, e.to_string())),
        }
    }
}

/// Options for `/api/v2/users/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserQuery {
    /// Only vouched (or unvouched) users.
    pub is_vouched: Option<bool>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub ircname: Option<String>,
    /// Primary or alternate email.
    pub email: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub page: Option<u32>,
    /// Language code spoken by the user.
    pub language: Option<String>,
    /// Group name the user is a member of.
    pub group: Option<String>,
    pub skill: Option<String>,
}

impl Query for UserQuery {
    const SCHEMA: &'static QuerySchema = &USERS;
}

/// Options for `/api/v2/groups/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupQuery {
    pub name: Option<String>,
    /// Mozillians id of a curator.
    pub curator: Option<u64>,
    pub functional_area: Option<bool>,
    pub members_can_leave: Option<bool>,
    pub accepting_new_members: Option<bool>,
    pub page: Option<u32>,
}

impl Query for GroupQuery {
    const SCHEMA: &'static QuerySchema = &GROUPS;
}

/// Options for `/api/v2/skills/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkillQuery {
    pub name: Option<String>,
    pub page: Option<u32>,
}

impl Query for SkillQuery {
    const SCHEMA: &'static QuerySchema = &SKILLS;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn valid_options_become_query_pairs() {
        let pairs = USERS
            .validate(&map(json!({"email": "a@b.c", "is_vouched": true, "page": 2})))
            .unwrap();

        assert!(pairs.contains(&("email".to_string(), "a@b.c".to_string())));
        assert!(pairs.contains(&("is_vouched".to_string(), "true".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
    }

    #[test]
    fn unknown_and_mistyped_options_are_all_reported() {
        let err = GROUPS
            .validate(&map(json!({"colour": "red", "curator": "bob", "name": "ok"})))
            .unwrap_err();

        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.contains(&ValidationError::new("colour", "unknown option")));
                assert!(errors.contains(&ValidationError::new("curator", "must have type: number")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn skills_schema_has_its_own_endpoint() {
        assert_eq!(SKILLS.path, "/api/v2/skills/");
        assert!(SKILLS.validate(&map(json!({"is_vouched": true}))).is_err());
    }

    #[test]
    fn typed_query_drops_unset_fields() {
        let query = UserQuery {
            username: Some("jonas".into()),
            page: Some(3),
            ..Default::default()
        };
        let options = query.to_options().unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(options["username"], json!("jonas"));
        assert!(UserQuery::SCHEMA.validate(&options).is_ok());
        assert!(SkillQuery::default().to_options().unwrap().is_empty());
    }

    #[test]
    fn assignments_are_typed_by_schema() {
        let options = GROUPS
            .parse_assignments(&["name=open-source", "curator=42", "functional_area=false"])
            .unwrap();

        assert_eq!(options["name"], json!("open-source"));
        assert_eq!(options["curator"], json!(42));
        assert_eq!(options["functional_area"], json!(false));
    }

    #[test]
    fn bad_assignments_are_rejected() {
        let err = USERS
            .parse_assignments(&["page=two", "nickname=x", "novalue"])
            .unwrap_err();
        match err {
            Error::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}

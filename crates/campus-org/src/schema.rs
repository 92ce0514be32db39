//! Domain field mapping for the auth collaborator's tenancy schema
//!
//! The collaborator models generic organizations, teams, members and
//! invitations. The portal stores them as universities, course groups,
//! users and admission offers with extra domain fields. This module is the
//! static rename table plus the additional-field declarations, and a
//! validator for records crossing that boundary.

use campus_rbac::ResourceKind;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{OrgError, OrgResult};

/// Generic tenancy models of the auth collaborator.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TenancyModel {
    /// Tenant (university)
    Organization,
    /// Sub-group of a tenant (course group)
    Team,
    /// User within a tenant (enrolled user)
    Member,
    /// Pending membership (admission offer)
    Invitation,
}

impl TenancyModel {
    /// Get all tenancy models.
    pub fn all() -> [Self; 4] {
        [Self::Organization, Self::Team, Self::Member, Self::Invitation]
    }

    /// Resource kind whose permissions guard this model.
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            Self::Organization => ResourceKind::Organization,
            Self::Team => ResourceKind::CourseGroup,
            Self::Member => ResourceKind::Member,
            Self::Invitation => ResourceKind::Invitation,
        }
    }
}

/// Value type of an additional field.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// String value
    String,
    /// Numeric value
    Number,
    /// Boolean value
    Boolean,
}

impl FieldType {
    /// Get string representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Check whether a JSON value has this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// A domain field attached to a tenancy model.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AdditionalField {
    /// Field name as stored
    pub name: &'static str,
    /// Value type
    pub field_type: FieldType,
    /// Whether the field must be present
    pub required: bool,
    /// Whether values must be unique within the model
    pub unique: bool,
}

impl AdditionalField {
    const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
            unique: false,
        }
    }

    const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            unique: false,
        }
    }

    const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Mapping for one tenancy model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMapping {
    /// Generic model
    pub model: TenancyModel,
    /// Storage model name in the portal
    pub model_name: &'static str,
    /// Generic field → domain field renames
    pub field_renames: &'static [(&'static str, &'static str)],
    /// Domain fields added to the model
    pub additional_fields: &'static [AdditionalField],
}

impl ModelMapping {
    /// Names of required additional fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.additional_fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
    }

    /// Names of unique additional fields.
    pub fn unique_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.additional_fields
            .iter()
            .filter(|f| f.unique)
            .map(|f| f.name)
    }

    /// Look up an additional field by name.
    pub fn field(&self, name: &str) -> Option<&AdditionalField> {
        self.additional_fields.iter().find(|f| f.name == name)
    }

    /// Domain name of a generic field; unmapped fields keep their name.
    pub fn domain_name<'a>(&self, generic_field: &'a str) -> &'a str {
        self.field_renames
            .iter()
            .find(|(generic, _)| *generic == generic_field)
            .map(|(_, domain)| *domain)
            .unwrap_or(generic_field)
    }

    /// Validate a record's additional fields.
    ///
    /// Required fields must be present and non-null; any declared field
    /// that is present must have the declared type. Undeclared keys are
    /// left to the collaborator.
    pub fn validate_record(&self, record: &Map<String, Value>) -> OrgResult<()> {
        for field in self.additional_fields {
            match record.get(field.name) {
                None | Some(Value::Null) if field.required => {
                    return Err(OrgError::MissingField {
                        model: self.model_name,
                        field: field.name,
                    });
                }
                None | Some(Value::Null) => {}
                Some(value) if !field.field_type.accepts(value) => {
                    return Err(OrgError::FieldType {
                        model: self.model_name,
                        field: field.name.to_string(),
                        expected: field.field_type.as_str(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

const UNIVERSITY_FIELDS: &[AdditionalField] = &[
    AdditionalField::required("faculty", FieldType::String),
    AdditionalField::required("department", FieldType::String),
    AdditionalField::required("programme", FieldType::String),
    AdditionalField::required("degreeType", FieldType::String),
    AdditionalField::optional("studyYear", FieldType::Number),
    AdditionalField::optional("intakeSeason", FieldType::String),
    AdditionalField::optional("accreditation", FieldType::String),
];

const COURSE_GROUP_FIELDS: &[AdditionalField] = &[
    AdditionalField::required("courseCode", FieldType::String),
    AdditionalField::required("courseTitle", FieldType::String),
    AdditionalField::required("creditHours", FieldType::Number),
    AdditionalField::required("semester", FieldType::String),
    AdditionalField::optional("lecturerId", FieldType::String),
    AdditionalField::optional("labSection", FieldType::String),
];

const USER_FIELDS: &[AdditionalField] = &[
    AdditionalField::required("fullName", FieldType::String),
    AdditionalField::optional("universityId", FieldType::String).unique(),
    AdditionalField::optional("nationalId", FieldType::String),
    AdditionalField::optional("admissionYear", FieldType::Number),
    AdditionalField::optional("currentSemester", FieldType::Number),
    AdditionalField::optional("cgpa", FieldType::Number),
    AdditionalField::optional("employeeNo", FieldType::String),
    AdditionalField::optional("academicRank", FieldType::String),
];

const ADMISSION_OFFER_FIELDS: &[AdditionalField] = &[
    AdditionalField::required("intendedRole", FieldType::String),
    AdditionalField::required("programme", FieldType::String),
    AdditionalField::optional("admissionType", FieldType::String),
];

/// The full tenancy schema mapping.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaMapping {
    models: [ModelMapping; 4],
}

impl SchemaMapping {
    /// The university portal mapping.
    pub fn university() -> Self {
        Self {
            models: [
                ModelMapping {
                    model: TenancyModel::Organization,
                    model_name: "universities",
                    field_renames: &[("name", "name"), ("slug", "code")],
                    additional_fields: UNIVERSITY_FIELDS,
                },
                ModelMapping {
                    model: TenancyModel::Team,
                    model_name: "course_groups",
                    field_renames: &[("name", "name")],
                    additional_fields: COURSE_GROUP_FIELDS,
                },
                ModelMapping {
                    model: TenancyModel::Member,
                    model_name: "users",
                    field_renames: &[("role", "role")],
                    additional_fields: USER_FIELDS,
                },
                ModelMapping {
                    model: TenancyModel::Invitation,
                    model_name: "admission_offers",
                    field_renames: &[],
                    additional_fields: ADMISSION_OFFER_FIELDS,
                },
            ],
        }
    }

    /// Mapping for one model.
    pub fn model(&self, model: TenancyModel) -> &ModelMapping {
        // `models` is ordered like `TenancyModel::all()`
        &self.models[model as usize]
    }

    /// Iterate over all model mappings.
    pub fn models(&self) -> impl Iterator<Item = &ModelMapping> {
        self.models.iter()
    }

    /// Domain name of a generic field on a model.
    pub fn domain_name<'a>(&self, model: TenancyModel, generic_field: &'a str) -> &'a str {
        self.model(model).domain_name(generic_field)
    }

    /// Validate a record crossing the collaborator boundary.
    pub fn validate_record(&self, model: TenancyModel, record: &Map<String, Value>) -> OrgResult<()> {
        self.model(model).validate_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_models_are_indexed_in_order() {
        let schema = SchemaMapping::university();
        for model in TenancyModel::all() {
            assert_eq!(schema.model(model).model, model);
        }
    }

    #[test]
    fn test_model_names() {
        let schema = SchemaMapping::university();
        assert_eq!(schema.model(TenancyModel::Organization).model_name, "universities");
        assert_eq!(schema.model(TenancyModel::Team).model_name, "course_groups");
        assert_eq!(schema.model(TenancyModel::Member).model_name, "users");
        assert_eq!(schema.model(TenancyModel::Invitation).model_name, "admission_offers");
    }

    #[test]
    fn test_field_renames() {
        let schema = SchemaMapping::university();
        assert_eq!(schema.domain_name(TenancyModel::Organization, "slug"), "code");
        assert_eq!(schema.domain_name(TenancyModel::Organization, "name"), "name");
        assert_eq!(schema.domain_name(TenancyModel::Invitation, "email"), "email");
    }

    #[test]
    fn test_every_model_maps_to_a_guarded_kind() {
        let access = campus_rbac::AccessControl::university().unwrap();
        for model in TenancyModel::all() {
            assert!(access.statements().contains(model.resource_kind()));
        }
    }

    #[test]
    fn test_required_and_unique_fields() {
        let schema = SchemaMapping::university();
        let required: Vec<_> = schema.model(TenancyModel::Team).required_fields().collect();
        assert_eq!(required, vec!["courseCode", "courseTitle", "creditHours", "semester"]);

        let unique: Vec<_> = schema.model(TenancyModel::Member).unique_fields().collect();
        assert_eq!(unique, vec!["universityId"]);
    }

    #[test]
    fn test_field_types() {
        let schema = SchemaMapping::university();
        let type_of = |model: TenancyModel, name: &str| {
            schema.model(model).field(name).map(|field| field.field_type)
        };
        assert_eq!(type_of(TenancyModel::Team, "creditHours"), Some(FieldType::Number));
        assert_eq!(type_of(TenancyModel::Team, "courseCode"), Some(FieldType::String));
        assert_eq!(type_of(TenancyModel::Member, "cgpa"), Some(FieldType::Number));
        assert_eq!(type_of(TenancyModel::Organization, "degreeType"), Some(FieldType::String));
        assert!(schema
            .models()
            .flat_map(|m| m.additional_fields)
            .all(|field| field.field_type != FieldType::Boolean));
    }

    #[test]
    fn test_validate_record_accepts_complete_record() {
        let schema = SchemaMapping::university();
        let team = record(json!({
            "name": "CS101-A",
            "courseCode": "CS101",
            "courseTitle": "Intro to Computing",
            "creditHours": 3,
            "semester": "Fall",
            "labSection": null
        }));
        assert!(schema.validate_record(TenancyModel::Team, &team).is_ok());
    }

    #[test]
    fn test_validate_record_missing_required() {
        let schema = SchemaMapping::university();
        let offer = record(json!({ "intendedRole": "student" }));
        assert_eq!(
            schema.validate_record(TenancyModel::Invitation, &offer),
            Err(OrgError::MissingField {
                model: "admission_offers",
                field: "programme",
            })
        );
    }

    #[test]
    fn test_validate_record_wrong_type() {
        let schema = SchemaMapping::university();
        let user = record(json!({ "fullName": "Amal", "cgpa": "3.9" }));
        let err = schema
            .validate_record(TenancyModel::Member, &user)
            .unwrap_err();
        assert_eq!(
            err,
            OrgError::FieldType {
                model: "users",
                field: "cgpa".to_string(),
                expected: "number",
            }
        );
    }
}

//! Logical fields and their alias spellings across source schemas
//!
//! Each [`Field`] carries an ordered list of the column names observed for it in the
//! regional datasets. Resolution walks that list in order and returns the first value
//! that is present and is not a "no data" sentinel, so the most canonical spelling
//! always wins when a malformed record populates more than one alias.

use serde_json::Value;

use super::RawRecord;

/// Numeric value several sources use to mean "no data"
pub const SENTINEL_NUMBER: f64 = 99.0;

/// String form of [`SENTINEL_NUMBER`]
pub const SENTINEL_STRING: &str = "99";

/// Logical attribute of a school record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Longitude,
    Latitude,
    Sector,
    Phase,
    Learners,
    Educators,
    District,
    Town,
    Quintile,
    NoFeeSchool,
    Suburb,
    Status,
    SchoolType,
    Specialisation,
    FullServiceSchool,
    Circuit,
    UrbanRural,
    Municipality,
    LocalMunicipality,
    WardId,
    Addressee,
    Township,
    StreetAddress,
    PostalAddress,
    Telephone,
    ExDept,
    Section21,
    DataYear,
    OwnerLand,
    OwnerBuildings,
    ExamNo,
    ExamCentre,
    SpCode,
    SpName,
    Nas,
    NodalArea,
    RegistrationDate,
    Allocation,
}

impl Field {
    /// Alias spellings for this field, most canonical first
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Id => &["NatEmis", "NatEMIS", "NATEMIS"],
            Self::Name => &[
                "Official_Institution_Name",
                "Institution_Name",
                "Name",
                "SchoolName",
            ],
            Self::Longitude => &["GIS_Longitude", "Longitude", "Long", "lon", "X"],
            Self::Latitude => &["GIS_Latitude", "Latitude", "Lat", "lat", "Y"],
            Self::Sector => &["Sector", "SECTOR"],
            Self::Phase => &["Phase_PED", "Phase", "PHASE"],
            Self::Learners => &["Learners2024", "Learners", "TotalLearners", "learners"],
            Self::Educators => &["Educators2024", "Educators", "TotalEducators", "educators"],
            Self::District => &["EIDistrict", "District", "DISTRICT"],
            Self::Town => &["Town_City", "towncity", "Town", "City", "TOWN"],
            Self::Quintile => &["Quintile", "QUINTILE", "quintile"],
            Self::NoFeeSchool => &["NoFeeSchool", "NoFee", "NO_FEE"],
            Self::Suburb => &["Suburb", "SUBURB"],
            Self::Status => &["Status", "STATUS"],
            Self::SchoolType => &["Type_DoE", "TypeDoE", "SchoolType", "Type"],
            Self::Specialisation => &["Specialisation", "Specialization", "SPECIALISATION"],
            Self::FullServiceSchool => &[
                "Full Service School",
                "FullServiceSchool",
                "Full_Service_School",
            ],
            Self::Circuit => &["EICircuit", "Circuit", "CIRCUIT"],
            Self::UrbanRural => &["Urban_Rural", "UrbanRural", "URBAN_RURAL"],
            Self::Municipality => &["DMunName", "Municipality", "MUNICIPALITY"],
            Self::LocalMunicipality => &["LMunName", "LocalMunicipality", "LOCAL_MUNICIPALITY"],
            Self::WardId => &["Ward_ID", "WardID", "Ward"],
            Self::Addressee => &["Addressee", "ADDRESSEE", "Contact", "ContactPerson"],
            Self::Township => &["Township_Village", "Township", "Village"],
            Self::StreetAddress => &["StreetAddress", "Street_Address", "Address"],
            Self::PostalAddress => &["PostalAddress", "Postal_Address", "PostalAddr"],
            Self::Telephone => &["Telephone", "Phone", "Tel", "TELEPHONE"],
            Self::ExDept => &["ExDept", "Ex_Dept", "Department"],
            Self::Section21 => &["Section21", "SECTION21"],
            Self::DataYear => &["Datayear", "Data Year", "DataYear"],
            Self::OwnerLand => &["Owner_Land", "OwnerLand", "OWNER_LAND"],
            Self::OwnerBuildings => &["Owner_Buildings", "OwnerBuildings", "OWNER_BUILDINGS"],
            Self::ExamNo => &["ExamNo", "Exam_No", "EXAMNO"],
            Self::ExamCentre => &["ExamCentre", "Exam_Centre", "EXAMCENTRE"],
            Self::SpCode => &["SP_Code", "SPCode", "SP_CODE"],
            Self::SpName => &["SP_Name", "SPName", "SP_NAME"],
            Self::Nas => &["NAS", "Nas"],
            Self::NodalArea => &["NodalArea", "Nodal_Area", "NODAL_AREA"],
            Self::RegistrationDate => &[
                "Registration_Date",
                "RegistrationDate",
                "REGISTRATION_DATE",
            ],
            Self::Allocation => &["Allocation", "ALLOCATION"],
        }
    }

    /// Broader identity spellings seen in older exports, consulted only when
    /// [`Field::aliases`] yields nothing. Empty for non-identity fields.
    #[must_use]
    pub const fn fallback_aliases(self) -> &'static [&'static str] {
        match self {
            Self::Id => &["NatEMIS", "NatEmis", "NATEMIS", "Id", "ID"],
            Self::Name => &[
                "Official_Institution_Name",
                "Institution_Name",
                "Name",
                "SchoolName",
            ],
            _ => &[],
        }
    }
}

/// Whether a value is one of the literals sources use for "no data"
#[must_use]
pub fn is_sentinel(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(n) => n.as_f64() == Some(SENTINEL_NUMBER),
        Value::String(s) => s == SENTINEL_STRING,
        _ => false,
    }
}

/// First non-sentinel value among the field's aliases
#[must_use]
pub fn resolve(record: &RawRecord, field: Field) -> Option<&Value> {
    field
        .aliases()
        .iter()
        .filter_map(|alias| record.get(*alias))
        .find(|value| !is_sentinel(value))
}

/// Like [`resolve`], but only when the resolved value is a string
#[must_use]
pub fn resolve_str(record: &RawRecord, field: Field) -> Option<&str> {
    resolve(record, field).and_then(Value::as_str)
}

/// Identity lookup with the widened fallback list
///
/// The primary aliases are resolved as usual; failing that, the first *populated*
/// value among [`Field::fallback_aliases`] is taken. Populated means not null, not
/// `false`, not zero and not an empty string.
#[must_use]
pub fn resolve_identity(record: &RawRecord, field: Field) -> Option<&Value> {
    resolve(record, field)
        .filter(|value| is_populated(value))
        .or_else(|| {
            field
                .fallback_aliases()
                .iter()
                .filter_map(|alias| record.get(*alias))
                .find(|value| is_populated(value))
        })
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_first_alias_wins() {
        let rec = record(json!({ "Name": "Second", "Official_Institution_Name": "First" }));
        assert_eq!(resolve_str(&rec, Field::Name), Some("First"));
    }

    #[test]
    fn test_sentinels_are_skipped() {
        let rec = record(json!({ "Quintile": 99, "QUINTILE": "99", "quintile": 3 }));
        assert_eq!(resolve(&rec, Field::Quintile), Some(&json!(3)));

        let rec = record(json!({ "Quintile": null }));
        assert_eq!(resolve(&rec, Field::Quintile), None);

        let rec = record(json!({ "Quintile": 99.0 }));
        assert_eq!(resolve(&rec, Field::Quintile), None);
    }

    #[test]
    fn test_missing_field() {
        let rec = record(json!({ "Unrelated": "x" }));
        assert_eq!(resolve(&rec, Field::Town), None);
        assert_eq!(resolve_str(&rec, Field::Town), None);
    }

    #[test]
    fn test_resolve_str_ignores_numbers() {
        let rec = record(json!({ "Status": 4 }));
        assert!(resolve(&rec, Field::Status).is_some());
        assert_eq!(resolve_str(&rec, Field::Status), None);
    }

    #[test]
    fn test_identity_fallback() {
        let rec = record(json!({ "ID": 500123 }));
        assert_eq!(resolve(&rec, Field::Id), None);
        assert_eq!(resolve_identity(&rec, Field::Id), Some(&json!(500123)));

        let rec = record(json!({ "NatEmis": "", "Id": "abc" }));
        assert_eq!(resolve_identity(&rec, Field::Id), Some(&json!("abc")));

        let rec = record(json!({ "NatEmis": 0, "ID": 0 }));
        assert_eq!(resolve_identity(&rec, Field::Id), None);
    }

    #[test]
    fn test_identity_fallback_takes_sentinel_name() {
        // A sentinel-only name still identifies the record through the fallback list
        let rec = record(json!({ "Name": 99 }));
        assert_eq!(resolve(&rec, Field::Name), None);
        assert_eq!(resolve_identity(&rec, Field::Name), Some(&json!(99)));
    }

    #[test]
    fn test_every_field_has_aliases() {
        let fields = [
            Field::Id,
            Field::Name,
            Field::Longitude,
            Field::Latitude,
            Field::RegistrationDate,
            Field::Allocation,
        ];
        for field in fields {
            assert!(!field.aliases().is_empty(), "{field:?} has no aliases");
        }
        assert!(Field::Town.fallback_aliases().is_empty());
    }
}

//! re3data metric catalog.

/// Metrics published under `/metrics/data/`, in output order.
pub const DEFAULT_METRICS: [&str; 27] = [
    "aidSystems",
    "apis",
    "certificates",
    "contentTypes",
    "dataAccess",
    "dataAccessRestrictions",
    "databaseAccess",
    "databaseAccessRestrictions",
    "databaseLicenses",
    "dataLicenses",
    "dataUploads",
    "dataUploadRestrictions",
    "enhancedPublication",
    "institutionCountry",
    "responsibilityTypes",
    "institutionType",
    "keywords",
    "metadataStandards",
    "pidSystems",
    "providerTypes",
    "qualityManagement",
    "repositoryLanguages",
    "software",
    "subjects",
    "syndications",
    "types",
    "versioning",
];

/// Field of a metric record holding its vocabulary terms.
pub const TERMS_FIELD: &str = "Terms";

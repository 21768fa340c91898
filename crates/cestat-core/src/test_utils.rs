//! Response fixtures shared by unit tests

/// Single bucket, single group
pub fn s3_example_response() -> &'static str {
    r#"{"ResultsByTime":[{"TimePeriod":{"Start":"2025-09-13"},"Groups":[{"Keys":["Amazon S3"],"Metrics":{"UnblendedCost":{"Amount":"0.0001662"}}}]}]}"#
}

/// A grouped query where the first day has no groups
pub fn no_groups_response() -> &'static str {
    r#"{
        "GroupDefinitions": [{"Type": "DIMENSION", "Key": "SERVICE"}],
        "ResultsByTime": [
            {
                "TimePeriod": {"Start": "2025-09-01", "End": "2025-09-02"},
                "Total": {"UnblendedCost": {"Amount": "12.3456789", "Unit": "USD"}},
                "Groups": [],
                "Estimated": true
            },
            {
                "TimePeriod": {"Start": "2025-09-02", "End": "2025-09-03"},
                "Total": {},
                "Groups": [
                    {"Keys": ["AWS Lambda"], "Metrics": {"UnblendedCost": {"Amount": "0.0000002", "Unit": "USD"}}}
                ],
                "Estimated": true
            }
        ],
        "DimensionValueAttributes": []
    }"#
}

/// Drill-down by service and usage type with usage quantities
pub fn drill_response() -> &'static str {
    r#"{
        "GroupDefinitions": [
            {"Type": "DIMENSION", "Key": "SERVICE"},
            {"Type": "DIMENSION", "Key": "USAGE_TYPE"}
        ],
        "ResultsByTime": [
            {
                "TimePeriod": {"Start": "2025-09-13", "End": "2025-09-14"},
                "Total": {},
                "Groups": [
                    {
                        "Keys": ["Amazon Simple Storage Service", "USE1-TimedStorage-ByteHrs"],
                        "Metrics": {
                            "UnblendedCost": {"Amount": "0.0000415", "Unit": "USD"},
                            "UsageQuantity": {"Amount": "0.0018043", "Unit": "GB-Month"}
                        }
                    },
                    {
                        "Keys": ["Amazon Simple Storage Service", "USE1-Requests-Tier1"],
                        "Metrics": {
                            "UnblendedCost": {"Amount": "0.006", "Unit": "USD"},
                            "UsageQuantity": {"Amount": "1200", "Unit": "Requests"}
                        }
                    }
                ],
                "Estimated": false
            }
        ]
    }"#
}

use crate::catalog;
use crate::error::FailureKind;
use crate::pagination::PageShape;

use models::PageLimit;
use models::employer::CostCenter;

use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Row {
    id: String,
}

fn envelope() -> PageShape<Row> {
    PageShape::Envelope {
        items_field: "items",
        key_field: "pagination_key",
    }
}

fn keyed() -> PageShape<Row> {
    PageShape::KeyedArray {
        key_of: |row: &Row| row.id.clone(),
    }
}

fn limit(n: u32) -> PageLimit {
    PageLimit::new(n).expect("valid limit")
}

// ============================================
// ENVELOPE
// ============================================

#[test]
fn given_envelope_with_key_when_decoded_then_items_and_key_returned() {
    let page = envelope()
        .decode(
            json!({"items": [{"id": "a"}, {"id": "b"}], "pagination_key": "k1"}),
            limit(2),
        )
        .expect("valid page");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].id, "b");
    assert_eq!(page.continuation_key.as_deref(), Some("k1"));
}

/// **VALUE**: A null, missing or empty key all mean "no more pages".
///
/// **WHY THIS MATTERS**: The backend omits the key on the last page in some handlers and
/// sends `""` in others. Treating `""` as a real key would request the first page again and
/// duplicate the whole list.
///
/// **BUG THIS CATCHES**: Would catch an empty-string key leaving `has_more` true.
#[test]
fn given_envelope_with_absent_or_empty_key_when_decoded_then_key_is_none() {
    for body in [
        json!({"items": [{"id": "a"}]}),
        json!({"items": [{"id": "a"}], "pagination_key": null}),
        json!({"items": [{"id": "a"}], "pagination_key": ""}),
    ] {
        let page = envelope().decode(body, limit(10)).expect("valid page");
        assert_eq!(page.continuation_key, None);
    }
}

#[test]
fn given_envelope_with_null_items_when_decoded_then_empty_page() {
    let page = envelope()
        .decode(json!({"items": null}), limit(10))
        .expect("valid page");

    assert!(page.items.is_empty());
}

/// **VALUE**: Shape mismatches surface as `ParseError`.
///
/// **BUG THIS CATCHES**: Would catch a response for the wrong endpoint (or an HTML body that
/// happened to be valid JSON) being read as an empty, finished list.
#[test]
fn given_malformed_envelopes_when_decoded_then_parse_error() {
    for body in [
        json!([{"id": "a"}]),
        json!({"posts": []}),
        json!({"items": [{"id": 1}]}),
        json!({"items": [], "pagination_key": 7}),
    ] {
        let error = envelope().decode(body, limit(10)).expect_err("should fail");
        assert_eq!(error.kind(), FailureKind::ParseError);
    }
}

// ============================================
// KEYED ARRAY
// ============================================

#[test]
fn given_full_batch_when_decoded_then_key_taken_from_last_item() {
    let page = keyed()
        .decode(json!([{"id": "a"}, {"id": "b"}]), limit(2))
        .expect("valid page");

    assert_eq!(page.continuation_key.as_deref(), Some("b"));
}

/// **VALUE**: A batch shorter than the limit ends the collection.
///
/// **WHY THIS MATTERS**: Bare-array endpoints never say "done" explicitly. Without this rule
/// the fetcher would issue one extra, empty request at the end of every list.
#[test]
fn given_short_batch_when_decoded_then_no_key() {
    let page = keyed()
        .decode(json!([{"id": "a"}]), limit(2))
        .expect("valid page");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.continuation_key, None);
}

#[test]
fn given_null_or_empty_array_when_decoded_then_empty_page_without_key() {
    for body in [json!(null), json!([])] {
        let page = keyed().decode(body, limit(1)).expect("valid page");
        assert!(page.items.is_empty());
        assert_eq!(page.continuation_key, None);
    }
}

#[test]
fn given_object_for_keyed_array_when_decoded_then_parse_error() {
    let error = keyed()
        .decode(json!({"items": []}), limit(1))
        .expect_err("should fail");

    assert_eq!(error.kind(), FailureKind::ParseError);
}

#[test]
fn given_full_batch_with_empty_key_field_when_decoded_then_no_key() {
    let page = keyed()
        .decode(json!([{"id": ""}]), limit(1))
        .expect("valid page");

    assert_eq!(page.continuation_key, None);
}

// ============================================
// CATALOG
// ============================================

#[test]
fn given_cost_center_page_when_decoded_then_keyed_by_name() {
    let endpoint = catalog::cost_centers();

    let page = endpoint
        .shape()
        .decode(
            json!([{"name": "Ops", "state": "ACTIVE_CC"}]),
            limit(1),
        )
        .expect("valid page");

    let first: &CostCenter = &page.items[0];
    assert_eq!(first.name, "Ops");
    assert_eq!(page.continuation_key.as_deref(), Some("Ops"));
    assert_eq!(endpoint.path(), "employer/get-cost-centers");
}

#[test]
fn given_catalog_paths_when_listed_then_carry_portal_prefix() {
    assert_eq!(catalog::home_timeline().path(), "hub/get-my-home-timeline");
    assert_eq!(catalog::org_users().path(), "employer/filter-org-users");
    assert!(matches!(
        catalog::colleague_approvals().shape(),
        PageShape::Envelope {
            items_field: "approvals",
            ..
        }
    ));
}

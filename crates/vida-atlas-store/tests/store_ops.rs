// SPDX-License-Identifier: Apache-2.0

use vida_atlas_model::{
    ContributorId, ModerationAction, ModerationState, NewSpecies, ScientificName, TaxonomyAxis,
    DEFAULT_IMAGE, NOT_ASSESSED,
};
use vida_atlas_query::SpeciesFilter;
use vida_atlas_store::{DistinctColumn, SpeciesStore, StoreError};

fn submission(name: &str) -> NewSpecies {
    NewSpecies::with_defaults(
        ScientificName::parse(name).expect("name"),
        ContributorId::parse("tester@example.org").expect("contributor"),
    )
}

#[test]
fn creation_applies_contribution_defaults() {
    let store = SpeciesStore::open_in_memory().expect("store");
    let record = store.create(&submission("Panthera onca")).expect("create");

    assert_eq!(record.scientific_name.as_str(), "Panthera onca");
    assert_eq!(record.conservation_status.as_deref(), Some(NOT_ASSESSED));
    assert_eq!(record.primary_photo.as_deref(), Some(DEFAULT_IMAGE));
    assert_eq!(record.moderation_state, Some(ModerationState::Pending));
    assert!(!record.created_at.is_empty());
    assert_eq!(record.created_at, record.updated_at);
}

#[test]
fn duplicate_scientific_name_conflicts_without_mutation() {
    let store = SpeciesStore::open_in_memory().expect("store");
    let original = store.create(&submission("Panthera onca")).expect("create");

    let mut duplicate = submission("Panthera onca");
    duplicate.common_name = "Imposter".to_string();
    let err = store.create(&duplicate).expect_err("duplicate must fail");
    assert_eq!(err, StoreError::Conflict("scientific_name"));

    let unchanged = store.get(original.id).expect("get");
    assert_eq!(unchanged, original);
}

#[test]
fn pending_records_stay_out_of_the_default_listing_until_approved() {
    let store = SpeciesStore::open_in_memory().expect("store");
    let record = store.create(&submission("Ambystoma mexicanum")).expect("create");

    let filter = SpeciesFilter::default();
    assert_eq!(store.count(&filter).expect("count"), 0);

    let approved = store
        .set_moderation_state(record.id, ModerationAction::Approved)
        .expect("approve");
    assert_eq!(approved.moderation_state, Some(ModerationState::Approved));
    assert!(approved.updated_at >= approved.created_at);

    assert_eq!(store.count(&filter).expect("count"), 1);
    let page = store.fetch_page(&filter, 15, 0).expect("page");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].scientific_name.as_str(), "Ambystoma mexicanum");
}

#[test]
fn rejection_keeps_the_record_but_hides_it() {
    let store = SpeciesStore::open_in_memory().expect("store");
    let record = store.create(&submission("Vaquita phantasma")).expect("create");

    let rejected = store
        .set_moderation_state(record.id, ModerationAction::Rejected)
        .expect("reject");
    assert_eq!(rejected.moderation_state, Some(ModerationState::Rejected));

    assert_eq!(store.count(&SpeciesFilter::default()).expect("count"), 0);
    let queue = SpeciesFilter {
        moderation_state: Some("rejected".to_string()),
        ..Default::default()
    };
    assert_eq!(store.count(&queue).expect("count"), 1);
}

#[test]
fn moderating_a_missing_id_is_not_found() {
    let store = SpeciesStore::open_in_memory().expect("store");
    let err = store
        .set_moderation_state(4242, ModerationAction::Approved)
        .expect_err("missing id");
    assert_eq!(err, StoreError::NotFound);
}

#[test]
fn distinct_scans_feed_the_aggregator() {
    let store = SpeciesStore::open_in_memory().expect("store");

    let mut a = submission("Panthera onca");
    a.conservation_status = "Near Threatened".to_string();
    a.top_locations = Some(r#"["Campeche (52)"]"#.to_string());
    store.create(&a).expect("create");

    let mut b = submission("Abies religiosa");
    b.conservation_status = "Least Concern".to_string();
    b.top_locations = Some(r#"["Michoacán (20)"]"#.to_string());
    b.kingdom = Some("Plantae".to_string());
    b.full_metadata = Some(r#"{"taxonomy":{"kingdom":"Plantae"}}"#.to_string());
    store.create(&b).expect("create");

    let statuses = store.distinct_values(DistinctColumn::Status).expect("distinct");
    assert_eq!(statuses.len(), 2);
    assert!(statuses.contains(&"Near Threatened".to_string()));

    // Only the jaguar lacks a flat kingdom, and it has no blob either, so
    // the fallback pass sees no candidate blobs.
    let blobs = store
        .metadata_for_missing(DistinctColumn::Taxonomy(TaxonomyAxis::Kingdom))
        .expect("blobs");
    assert!(blobs.is_empty());

    // The oyamel's flat phylum is missing; its blob is the candidate.
    let blobs = store
        .metadata_for_missing(DistinctColumn::Taxonomy(TaxonomyAxis::Phylum))
        .expect("blobs");
    assert_eq!(blobs.len(), 1);

    let locations = store.all_top_locations().expect("locations");
    assert_eq!(locations.len(), 2);
}

#[test]
fn store_survives_reopen_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("species.sqlite3");

    let created_id = {
        let store = SpeciesStore::open(&path).expect("open");
        store.create(&submission("Lynx rufus")).expect("create").id
    };

    let store = SpeciesStore::open(&path).expect("reopen");
    let record = store.get(created_id).expect("get");
    assert_eq!(record.scientific_name.as_str(), "Lynx rufus");
}

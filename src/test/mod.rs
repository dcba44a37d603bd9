use std::path::Path;

use crate::library::*;


use synthetic_images::SyntheticImageSet;

const DESCRIPTOR_CFG: DescriptorCfg = DescriptorCfg {
    num_bins: 16,
    num_features: 40,
};

#[test]
//querying with one of the indexed images must rank that image first under both rankings.
fn test_query_with_indexed_image() {
    let images = SyntheticImageSet::create("self_query", 5, 11);
    let image_set = images.image_set_cfg();
    let extractor = ImageExtractor::default();

    let db = preprocess(&image_set, &DESCRIPTOR_CFG, &extractor).unwrap();
    assert_eq!(db.len(), 5);
    for (_idx, image) in db.iter() {
        assert!(!image.local_features().is_empty());
        assert!(image.local_features().len() <= DESCRIPTOR_CFG.num_features);
    }

    let query_path = image_set.image_path(2);
    for &parallel in &[false, true] {
        let closest = SearchCfg { k: 1, parallel };
        let output = run_query(&query_path, &db, &DESCRIPTOR_CFG, &closest, &extractor).unwrap();
        assert_eq!(output.global(), &[2]);
        assert_eq!(output.local(), &[2]);

        let three_closest = SearchCfg { k: 3, parallel };
        let output = run_query(&query_path, &db, &DESCRIPTOR_CFG, &three_closest, &extractor).unwrap();
        assert_eq!(output.global().len(), 3);
        assert_eq!(output.local().len(), 3);
        assert_eq!(output.global()[0], 2);
    }
}

#[test]
fn test_self_query_votes() {
    let images = SyntheticImageSet::create("self_votes", 4, 23);
    let image_set = images.image_set_cfg();
    let extractor = ImageExtractor::default();

    let db = preprocess(&image_set, &DESCRIPTOR_CFG, &extractor).unwrap();
    let query_features = extractor
        .extract_local_features(&image_set.image_path(1), db.len(), DESCRIPTOR_CFG.num_features)
        .unwrap();

    //every query feature finds its own copy at distance zero
    let votes = accumulate_votes(&query_features, &db, 1, false).unwrap();
    assert_eq!(votes.iter().sum::<usize>(), query_features.len());
    assert_eq!(votes[1], query_features.len());

    let query_hist = extractor
        .extract_histogram(&image_set.image_path(1), db.len(), DESCRIPTOR_CFG.num_bins)
        .unwrap();
    let distances = global_distances(&query_hist, &db);
    assert_eq!(distances[1], 0.0);
    assert!(distances.iter().enumerate().all(|(i, &d)| i == 1 || d > 0.0));
}

#[test]
fn test_missing_image_aborts_preprocessing() {
    let images = SyntheticImageSet::create("missing", 2, 5);
    let mut image_set = images.image_set_cfg();
    image_set.num_images = 3;

    let res = preprocess(&image_set, &DESCRIPTOR_CFG, &ImageExtractor::default());
    match res {
        Err(LibError::ExtractionError(ExtractionError::ImageLoad { path, .. })) => {
            assert_eq!(path, image_set.image_path(2))
        }
        other => panic!("expected an image load error, got {:?}", other.map(|db| db.len())),
    }
}

#[test]
fn test_unreadable_query() {
    let images = SyntheticImageSet::create("bad_query", 2, 8);
    let image_set = images.image_set_cfg();
    let extractor = ImageExtractor::default();
    let db = preprocess(&image_set, &DESCRIPTOR_CFG, &extractor).unwrap();

    let not_an_image = images.root().join("notes.txt");
    std::fs::write(&not_an_image, "not an image").unwrap();

    let search_cfg = SearchCfg { k: 1, parallel: false };
    for query in &[not_an_image.as_path(), Path::new("/nonexistent/query.png")] {
        assert!(matches!(
            run_query(query, &db, &DESCRIPTOR_CFG, &search_cfg, &extractor),
            Err(LibError::ExtractionError(_))
        ));
    }
}

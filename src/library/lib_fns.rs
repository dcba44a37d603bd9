use std::path::Path;

use crate::library::*;

/// Extracts the descriptors of every image in the image set, in index order.
///
/// The first image that cannot be processed aborts the whole pass: a database with holes in it
/// would shift every image index after the hole.
pub fn preprocess<E: FeatureExtractor>(
    image_set: &ImageSetCfg,
    descriptor_cfg: &DescriptorCfg,
    extractor: &E,
) -> Result<DescriptorDatabase, LibError> {
    let mut db = DescriptorDatabase::new();

    for image_index in 0..image_set.num_images {
        let path = image_set.image_path(image_index);
        debug!("Extracting descriptors from {}", path.display());

        let histogram = extractor.extract_histogram(&path, image_index, descriptor_cfg.num_bins)?;
        let local_features = extractor.extract_local_features(&path, image_index, descriptor_cfg.num_features)?;
        trace!("{}: {} local features", path.display(), local_features.len());

        db.push(ImageDescriptorSet::new(histogram, local_features));
    }

    info!(
        "Indexed {} images ({} local features)",
        db.len(),
        db.total_local_features()
    );

    Ok(db)
}

/// Runs both rankings for a single query image.
pub fn run_query<E: FeatureExtractor>(
    query_path: &Path,
    db: &DescriptorDatabase,
    descriptor_cfg: &DescriptorCfg,
    search_cfg: &SearchCfg,
    extractor: &E,
) -> Result<QueryOutput, LibError> {
    //the query is tagged as if it were the next image after the database
    let query_index = db.len();

    let histogram = extractor.extract_histogram(query_path, query_index, descriptor_cfg.num_bins)?;
    let global = rank_global(&histogram, db, search_cfg.k)?;

    let local_features = extractor.extract_local_features(query_path, query_index, descriptor_cfg.num_features)?;
    debug!("Query {} has {} local features", query_path.display(), local_features.len());
    let local = rank_local(&local_features, db, search_cfg.k, search_cfg.parallel)?;

    Ok(QueryOutput::new(query_path.to_path_buf(), global, local))
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, path::PathBuf};

    use super::*;

    //Serves descriptors from memory, keyed by the file name of the requested path.
    struct MockExtractor {
        histograms: Vec<(&'static str, f64)>,
        features: Vec<(&'static str, Vec<f64>)>,
        requested: RefCell<Vec<(PathBuf, usize)>>,
    }

    impl MockExtractor {
        fn lookup<'a, T>(entries: &'a [(&'static str, T)], path: &Path) -> Option<&'a T> {
            let name = path.to_str()?;
            entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
        }
    }

    impl FeatureExtractor for MockExtractor {
        fn extract_histogram(&self, path: &Path, image_index: usize, num_bins: u32) -> Result<Histogram, ExtractionError> {
            self.requested.borrow_mut().push((path.to_path_buf(), image_index));
            let value = Self::lookup(&self.histograms, path).ok_or_else(|| ExtractionError::ImageLoad {
                path: path.to_path_buf(),
                reason: "missing".to_string(),
            })?;
            let channel = |v: f64| FeaturePoint::new(vec![v; num_bins as usize], image_index);
            Ok(Histogram::new(channel(*value), channel(0.0), channel(0.0)))
        }

        fn extract_local_features(
            &self,
            path: &Path,
            image_index: usize,
            max_features: usize,
        ) -> Result<Vec<FeaturePoint>, ExtractionError> {
            let values = Self::lookup(&self.features, path).ok_or_else(|| ExtractionError::ImageLoad {
                path: path.to_path_buf(),
                reason: "missing".to_string(),
            })?;
            Ok(values
                .iter()
                .take(max_features)
                .map(|&v| FeaturePoint::new(vec![v], image_index))
                .collect())
        }
    }

    fn image_set(num_images: usize) -> ImageSetCfg {
        ImageSetCfg {
            dir: PathBuf::from("imgs/"),
            prefix: "img".to_string(),
            suffix: ".png".to_string(),
            num_images,
        }
    }

    fn extractor() -> MockExtractor {
        MockExtractor {
            histograms: vec![
                ("imgs/img0.png", 10.0),
                ("imgs/img1.png", 2.0),
                ("imgs/img2.png", 6.0),
                ("query.png", 3.0),
            ],
            features: vec![
                ("imgs/img0.png", vec![0.0, 1.0]),
                ("imgs/img1.png", vec![10.0, 11.0]),
                ("imgs/img2.png", vec![20.0, 22.0]),
                ("query.png", vec![19.0, 21.0, 0.5]),
            ],
            requested: RefCell::new(vec![]),
        }
    }

    const DESCRIPTOR_CFG: DescriptorCfg = DescriptorCfg {
        num_bins: 4,
        num_features: 10,
    };

    #[test]
    fn test_preprocess_builds_in_index_order() {
        let extractor = extractor();
        let db = preprocess(&image_set(3), &DESCRIPTOR_CFG, &extractor).unwrap();

        assert_eq!(db.len(), 3);
        assert_eq!(db.total_local_features(), 6);
        for (idx, image) in db.iter() {
            assert_eq!(image.histogram().image_index(), idx);
            assert_eq!(image.histogram().num_bins(), 4);
            assert!(image.local_features().iter().all(|f| f.image_index() == idx));
        }

        let requested = extractor.requested.borrow();
        assert_eq!(
            *requested,
            vec![
                (PathBuf::from("imgs/img0.png"), 0),
                (PathBuf::from("imgs/img1.png"), 1),
                (PathBuf::from("imgs/img2.png"), 2),
            ]
        );
    }

    #[test]
    fn test_preprocess_aborts_on_failure() {
        let extractor = extractor();

        let res = preprocess(&image_set(4), &DESCRIPTOR_CFG, &extractor);
        assert!(matches!(
            res,
            Err(LibError::ExtractionError(ExtractionError::ImageLoad { .. }))
        ));
    }

    #[test]
    fn test_run_query() {
        let extractor = extractor();
        let db = preprocess(&image_set(3), &DESCRIPTOR_CFG, &extractor).unwrap();
        let search_cfg = SearchCfg { k: 2, parallel: false };

        let output = run_query(Path::new("query.png"), &db, &DESCRIPTOR_CFG, &search_cfg, &extractor).unwrap();

        //histogram distances from 3.0: 7, 1, 3
        assert_eq!(output.global(), &[1, 2]);
        //19 and 21 both vote twice for image2, 0.5 votes twice for image0
        assert_eq!(output.local(), &[2, 0]);
        assert_eq!(output.query(), Path::new("query.png"));

        //the query is tagged one past the database
        assert_eq!(extractor.requested.borrow().last().unwrap().1, 3);
    }

    #[test]
    fn test_run_query_missing_image() {
        let extractor = extractor();
        let db = preprocess(&image_set(3), &DESCRIPTOR_CFG, &extractor).unwrap();
        let search_cfg = SearchCfg { k: 2, parallel: true };

        let res = run_query(Path::new("nope.png"), &db, &DESCRIPTOR_CFG, &search_cfg, &extractor);
        assert!(res.is_err());
    }
}

use std::path::Path;

use paedsrx_knowledge::DocumentKind;
use paedsrx_knowledge::config::StoreConfig;

#[test]
fn default_points_at_data_dir() {
    let config = StoreConfig::default();
    assert_eq!(config.data_dir, Path::new("data"));
    assert_eq!(
        config.source().path_for(DocumentKind::Guidelines),
        Path::new("data/guidelines.json")
    );
}

//! Delivery URL formatting properties.

use proptest::prelude::*;

use cfimages_storage::{
    CloudflareImagesAdapter, CloudflareImagesConfig, Document, StorageAdapter,
};

proptest! {
    #[test]
    fn prop_url_is_deterministic(
        hash in "[A-Za-z0-9_-]{1,24}",
        image_id in "[A-Za-z0-9-]{1,40}",
        variant in "[a-z0-9]{1,16}",
        filename in "[a-z]{1,8}\\.(png|jpg|webp)",
    ) {
        let adapter = CloudflareImagesAdapter::new(
            CloudflareImagesConfig::new("key", "acc", hash.clone()).with_variant(variant.clone()),
        )
        .unwrap();
        let doc = Document::new(1).with_cloudflare_id(image_id.clone());

        let url = adapter.generate_url(&doc, &filename);
        prop_assert_eq!(
            &url,
            &format!("https://imagedelivery.net/{}/{}/{}", hash, image_id, variant)
        );
        prop_assert_eq!(adapter.generate_url(&doc, "other.gif"), url);
    }

    #[test]
    fn prop_missing_id_yields_empty_url(doc_id in any::<i64>(), filename in "[a-z]{1,8}") {
        let config = CloudflareImagesConfig::new("key", "acc", "hash");
        let adapter = CloudflareImagesAdapter::new(config).unwrap();
        prop_assert_eq!(adapter.generate_url(&Document::new(doc_id), &filename), "");
    }
}

#[test]
fn test_custom_delivery_base() {
    let adapter = CloudflareImagesAdapter::new(
        CloudflareImagesConfig::new("key", "acc", "hash1")
            .with_delivery_base("https://images.example.com/cdn-cgi/imagedelivery/"),
    )
    .unwrap();
    let doc = Document::new(1).with_cloudflare_id("img123");

    assert_eq!(
        adapter.generate_url(&doc, "cat.png"),
        "https://images.example.com/cdn-cgi/imagedelivery/hash1/img123/public"
    );
}

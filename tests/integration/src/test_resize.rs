//! End-to-end resize tests against a live S3-compatible endpoint.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use aws_sdk_s3::primitives::ByteStream;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use edge_resize_model::{EdgeOutcome, EdgeResponse};
    use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};

    use crate::{cleanup_bucket, create_test_bucket, edge_request, resizer, s3_client};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .expect("encode png");
        out
    }

    fn response(outcome: EdgeOutcome) -> EdgeResponse {
        match outcome {
            EdgeOutcome::Respond(r) => r,
            EdgeOutcome::Forward(req) => panic!("expected a response, request was forwarded: {req:?}"),
        }
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_resize_stored_png() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "resize").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("images/photo.bin")
            .body(ByteStream::from(png(64, 32)))
            .content_type("application/octet-stream")
            .cache_control("max-age=600")
            .send()
            .await
            .expect("put_object");

        let outcome = resizer(&client)
            .handle_request(edge_request(&bucket, "/images/photo.bin", "size=16x"))
            .await;
        let resp = response(outcome);

        assert_eq!(resp.status, 200);
        assert_eq!(resp.headers.len(), 1, "only content-type expected");
        assert_eq!(resp.headers["content-type"][0].value, "image/png");

        let body = STANDARD
            .decode(resp.body.expect("body"))
            .expect("base64 body");
        let img = image::load_from_memory(&body).expect("decode resized image");
        assert_eq!(img.dimensions(), (16, 8));

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_pass_through_text_object_with_metadata() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "passthru").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("notes.txt")
            .body(ByteStream::from_static(b"just text"))
            .content_type("text/plain")
            .content_language("en")
            .send()
            .await
            .expect("put_object");

        let outcome = resizer(&client)
            .handle_request(edge_request(&bucket, "/notes.txt", "size=100x100"))
            .await;
        let resp = response(outcome);

        assert_eq!(resp.status, 200);
        assert_eq!(resp.headers["content-type"][0].value, "text/plain");
        assert_eq!(resp.headers["content-language"][0].value, "en");
        assert!(resp.headers.contains_key("etag"));
        assert!(resp.headers.contains_key("last-modified"));
        assert_eq!(
            STANDARD.decode(resp.body.expect("body")).expect("base64"),
            b"just text"
        );

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_replay_missing_key_status() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "missing").await;

        let outcome = resizer(&client)
            .handle_request(edge_request(&bucket, "/nope.png", "size=10x10"))
            .await;

        assert_eq!(outcome, EdgeOutcome::Respond(EdgeResponse::status_only(404)));

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_forward_without_size() {
        let client = s3_client();
        let request = edge_request("any-bucket", "/a.png", "v=2");

        let outcome = resizer(&client).handle_request(request.clone()).await;

        assert_eq!(outcome, EdgeOutcome::Forward(request));
    }
}

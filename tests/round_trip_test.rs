mod common;

use anyhow::Result;
use open311_client::{codec_for, Format, WireCodec};

fn codecs() -> [&'static dyn WireCodec; 2] {
    [codec_for(Format::Xml), codec_for(Format::Json)]
}

#[test]
fn service_lists_survive_both_encodings() -> Result<()> {
    let services = codec_for(Format::Xml).decode_service_list(common::service_list_xml())?;
    for codec in codecs() {
        let encoded = codec.encode_service_list(&services)?;
        assert_eq!(codec.decode_service_list(&encoded)?, services);
    }
    Ok(())
}

#[test]
fn service_definitions_survive_both_encodings() -> Result<()> {
    let definition =
        codec_for(Format::Json).decode_service_definition(common::service_definition_json())?;
    for codec in codecs() {
        let encoded = codec.encode_service_definition(&definition)?;
        assert_eq!(codec.decode_service_definition(&encoded)?, definition);
    }
    Ok(())
}

#[test]
fn service_requests_survive_both_encodings() -> Result<()> {
    let requests = codec_for(Format::Xml).decode_service_requests(common::service_requests_xml())?;
    for codec in codecs() {
        let encoded = codec.encode_service_requests(&requests)?;
        assert_eq!(codec.decode_service_requests(&encoded)?, requests);
    }
    Ok(())
}

#[test]
fn acknowledgments_and_errors_survive_both_encodings() -> Result<()> {
    let id_response =
        codec_for(Format::Xml).decode_request_id_from_token(common::request_id_from_token_xml())?;
    let post_response = codec_for(Format::Xml)
        .decode_post_service_request_response(common::post_service_request_response_xml())?;
    let error = codec_for(Format::Json).decode_error(common::error_json())?;

    for codec in codecs() {
        let encoded = codec.encode_request_id_response(&id_response)?;
        assert_eq!(codec.decode_request_id_from_token(&encoded)?, id_response);

        let encoded = codec.encode_post_service_request_response(&post_response)?;
        assert_eq!(
            codec.decode_post_service_request_response(&encoded)?,
            post_response
        );

        let encoded = codec.encode_error(&error)?;
        assert_eq!(codec.decode_error(&encoded)?, error);
    }
    Ok(())
}

#[test]
fn discovery_documents_survive_both_encodings() -> Result<()> {
    let discovery = codec_for(Format::Json).decode_service_discovery(common::discovery_json())?;
    for codec in codecs() {
        let encoded = codec.encode_service_discovery(&discovery)?;
        assert_eq!(codec.decode_service_discovery(&encoded)?, discovery);
    }
    Ok(())
}

#[test]
fn the_encodings_agree_on_the_same_records() -> Result<()> {
    let from_xml = codec_for(Format::Xml).decode_service_requests(common::service_requests_xml())?;
    let encoded = codec_for(Format::Json).encode_service_requests(&from_xml)?;
    let from_json = codec_for(Format::Json).decode_service_requests(&encoded)?;
    assert_eq!(from_xml, from_json);
    Ok(())
}

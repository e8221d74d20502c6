use super::*;

#[test]
fn pixel_size_parses_with_or_without_suffix() {
    assert_eq!("32px".parse::<PixelSize>().unwrap(), PixelSize::Px32);
    assert_eq!("64".parse::<PixelSize>().unwrap(), PixelSize::Px64);
    assert_eq!(" 128px ".parse::<PixelSize>().unwrap(), PixelSize::Px128);
    assert_eq!(PixelSize::Px64.to_string(), "64px");
}

#[test]
fn unknown_pixel_sizes_are_validation_errors() {
    for bad in ["16px", "px", "large", ""] {
        assert!(
            matches!(bad.parse::<PixelSize>(), Err(BeastError::Validation(_))),
            "{bad}"
        );
    }
}

#[test]
fn json_request_uses_defaults() {
    let req: GenerateRequest = serde_json::from_str(r#"{"description":"slime"}"#).unwrap();
    assert_eq!(req.description.as_deref(), Some("slime"));
    assert_eq!(req.pixel_size, PixelSize::Px32);
    assert_eq!(req.quantity, 4);
}

#[test]
fn json_request_reads_camel_case_and_alias() {
    let req: GenerateRequest =
        serde_json::from_str(r#"{"description":"x","pixelSize":"128px","quantity":2}"#).unwrap();
    assert_eq!(req.pixel_size, PixelSize::Px128);
    assert_eq!(req.quantity, 2);

    let req: GenerateRequest =
        serde_json::from_str(r#"{"description":"x","pixelBlockSize":"64px"}"#).unwrap();
    assert_eq!(req.pixel_size, PixelSize::Px64);

    assert!(serde_json::from_str::<GenerateRequest>(r#"{"pixelSize":"7px"}"#).is_err());
}

#[test]
fn validate_rejects_missing_description_and_bad_quantity() {
    let cfg = EngineConfig::default();
    let missing = GenerateRequest {
        description: None,
        pixel_size: PixelSize::Px32,
        quantity: 1,
    };
    assert!(matches!(missing.validate(&cfg), Err(BeastError::Validation(_))));
    assert!(GenerateRequest::new("x").with_quantity(0).validate(&cfg).is_err());
    assert!(GenerateRequest::new("x").with_quantity(17).validate(&cfg).is_err());
    assert_eq!(
        GenerateRequest::new("x").with_quantity(16).validate(&cfg).unwrap(),
        "x"
    );
}

#[test]
fn empty_description_follows_config() {
    let mut cfg = EngineConfig::default();
    assert_eq!(GenerateRequest::new("").validate(&cfg).unwrap(), "");
    cfg.allow_empty_description = false;
    assert!(GenerateRequest::new("   ").validate(&cfg).is_err());
}

#[test]
fn response_serializes_camel_case() {
    let resp = GenerateResponse {
        images: vec!["data:image/png;base64,".into()],
        audios: vec!["data:audio/wav;base64,".into()],
        prompt_echo: "slime".into(),
        method: GenerationMethod::Procedural,
        variants: vec![VariantMeta {
            index: 0,
            style: "cute and friendly".into(),
            pose: "standing pose".into(),
            prompt: "slime, cute and friendly, standing pose".into(),
            audio_text: "slime, variation 1".into(),
            external_image: false,
            external_audio: false,
        }],
    };
    let v: serde_json::Value = serde_json::from_str(&resp.to_json_pretty().unwrap()).unwrap();
    assert_eq!(v["promptEcho"], "slime");
    assert_eq!(v["method"], "procedural");
    assert_eq!(v["variants"][0]["audioText"], "slime, variation 1");
    assert_eq!(v["variants"][0]["externalImage"], false);
}

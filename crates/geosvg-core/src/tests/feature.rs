use crate::*;
use serde_json::json;

#[test]
fn parses_feature_with_properties() {
    let f = parse_feature(
        r#"{"type": "Feature", "properties": {"id": "the_id", "class": "a_class", "n": 3},
            "geometry": {"type": "Point", "coordinates": [10.5,20]}}"#,
    )
    .unwrap();
    assert_eq!(f.geometry, Some(Geometry::Point(coord(10.5, 20.0))));
    assert_eq!(f.properties.get("class"), Some(&json!("a_class")));
    assert_eq!(f.properties.get("n"), Some(&json!(3)));
}

#[test]
fn feature_without_properties_has_empty_map() {
    let f = parse_feature(
        r#"{"type": "Feature", "properties": null, "geometry": {"type": "Point", "coordinates": [1,2]}}"#,
    )
    .unwrap();
    assert!(f.properties.is_empty());
}

#[test]
fn feature_with_null_geometry_is_accepted() {
    let f = parse_feature(r#"{"type": "Feature", "geometry": null, "properties": {}}"#).unwrap();
    assert_eq!(f.geometry, None);
}

#[test]
fn rejects_feature_with_broken_geometry() {
    let text = r#"{"type": "Feature", "geometry": {
        type": "Point",
        "coordinates": [10.5,20]
    }}"#;
    let err = parse_feature(text).unwrap_err();
    assert_eq!(err.to_string(), format!("invalid feature: {text}"));
}

#[test]
fn rejects_geometry_passed_as_feature() {
    let text = r#"{"type": "Point", "coordinates": [1, 2]}"#;
    assert!(matches!(
        parse_feature(text),
        Err(Error::InvalidFeature { .. })
    ));
}

#[test]
fn parses_feature_collection_in_order() {
    let fc = parse_feature_collection(
        r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [10.5,20]}},
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[10.4,20.5], [40.3,42.3]]}}
        ]}"#,
    )
    .unwrap();
    let kinds: Vec<_> = fc
        .features
        .iter()
        .map(|f| f.geometry.as_ref().map(Geometry::kind))
        .collect();
    assert_eq!(kinds, vec![Some("Point"), Some("LineString")]);
}

#[test]
fn rejects_broken_feature_collection() {
    let text = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [10.5,20]}}
        {"type": "Feature"}
    ]}"#;
    let err = parse_feature_collection(text).unwrap_err();
    assert_eq!(err.to_string(), format!("invalid feature collection: {text}"));
}

#[test]
fn parse_any_dispatches_on_type() {
    assert!(matches!(
        parse_any(r#"{"type": "Point", "coordinates": [1, 2]}"#),
        Ok(GeoJson::Geometry(Geometry::Point(_)))
    ));
    assert!(matches!(
        parse_any(r#"{"type": "Feature", "geometry": null}"#),
        Ok(GeoJson::Feature(_))
    ));
    assert!(matches!(
        parse_any(r#"{"type": "FeatureCollection", "features": []}"#),
        Ok(GeoJson::FeatureCollection(_))
    ));
    assert!(matches!(
        parse_any(r#"{"coordinates": [1, 2]}"#),
        Err(Error::InvalidGeoJson { .. })
    ));
    assert!(matches!(
        parse_any("not json"),
        Err(Error::InvalidGeoJson { .. })
    ));
}

#[test]
fn feature_builder_and_collection_from_iter() {
    let fc: FeatureCollection = [
        Feature::new(Geometry::Point(coord(1.0, 2.0))).with_property("class", "a"),
        Feature::default(),
    ]
    .into_iter()
    .collect();
    assert_eq!(fc.features.len(), 2);
    assert_eq!(fc.features[0].properties.get("class"), Some(&json!("a")));
    assert_eq!(fc.features[1].geometry, None);
}

//! End-to-end checks of the dataset -> reprojection -> presentation pipeline

use rail_track_lib::config::DEFAULT_PALETTE;
use rail_track_lib::{FeatureCollection, Reprojector, Rgb, TrackPresenter, TrackShape};

const LONDON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[530000, 180000], [531000, 181000]] },
            "properties": { "TRACK_ID": 1100, "ELR": "ABC1" }
        }
    ]
}"#;

fn dataset(features: &[(i64, &str)]) -> FeatureCollection {
    let features: Vec<String> = features
        .iter()
        .enumerate()
        .map(|(i, (track_id, elr))| {
            let e = 520000 + i as i64 * 500;
            format!(
                r#"{{ "type": "Feature",
                     "geometry": {{ "type": "LineString", "coordinates": [[{e}, 175000], [{}, 175800]] }},
                     "properties": {{ "TRACK_ID": {track_id}, "ELR": "{elr}" }} }}"#,
                e + 400
            )
        })
        .collect();
    FeatureCollection::from_str(&format!(
        r#"{{ "type": "FeatureCollection", "features": [{}] }}"#,
        features.join(",")
    ))
    .unwrap()
}

#[test]
fn single_london_track() {
    let source = FeatureCollection::from_str(LONDON).unwrap();
    let reprojector = Reprojector::british_national_grid().unwrap();
    let presentation = TrackPresenter::default().present(&reprojector, &source);

    assert!(presentation.errors.is_empty());
    let geometry = presentation.collection.features[0].geometry.as_ref().unwrap();
    let Some(TrackShape::Line(line)) = geometry.shape().unwrap() else {
        panic!("expected a line");
    };
    for coord in line.coords() {
        assert!((coord.x - -0.12).abs() < 0.03, "lon {}", coord.x);
        assert!((coord.y - 51.51).abs() < 0.03, "lat {}", coord.y);
    }

    let track = &presentation.tracks[0];
    assert_eq!(track.style.color.to_string(), "#E69F00");
    assert_eq!(track.style.weight, 4.0);
    assert!(track.label.contains("UP MAIN FAST"));
    assert!(track.label.contains("1100"));
    assert!(track.label.contains("ABC1"));

    let bounds = presentation.bounds.unwrap();
    assert!(bounds.west() < bounds.east());
    assert!(bounds.south() < bounds.north());
}

#[test]
fn unknown_track_keeps_identifier() {
    let source = dataset(&[(9999, "XYZ")]);
    let presentation = TrackPresenter::default()
        .present(&Reprojector::british_national_grid().unwrap(), &source);

    let label = &presentation.tracks[0].label;
    assert!(label.starts_with("  9999"));
    assert!(label.contains("XYZ"));
}

#[test]
fn empty_dataset() {
    let source = FeatureCollection::from_str(r#"{ "type": "FeatureCollection", "features": [] }"#)
        .unwrap();
    let presentation = TrackPresenter::default()
        .present(&Reprojector::british_national_grid().unwrap(), &source);

    assert!(presentation.colors.is_empty());
    assert!(presentation.bounds.is_none());
}

#[test]
fn reprojection_preserves_count_and_properties() {
    let source = dataset(&[(1100, "A"), (2100, "B"), (1100, "C"), (3900, "D")]);
    let reprojector = Reprojector::british_national_grid().unwrap();

    let output = reprojector.reproject_collection(&source);

    assert!(output.errors.is_empty());
    assert_eq!(output.collection.len(), source.len());
    for (before, after) in source.features.iter().zip(&output.collection.features) {
        assert_eq!(before.properties, after.properties);
        assert_ne!(before.geometry, after.geometry);
    }
}

#[test]
fn reprojection_is_bit_identical_across_runs() {
    let source = dataset(&[(1100, "A"), (2200, "B")]);
    let reprojector = Reprojector::british_national_grid().unwrap();

    let first = reprojector.reproject_collection(&source).collection;
    let second = reprojector.reproject_collection(&source).collection;
    assert_eq!(first, second);

    let fresh = Reprojector::british_national_grid().unwrap();
    assert_eq!(fresh.reproject_collection(&source).collection, first);
}

#[test]
fn every_distinct_track_gets_one_stable_color() {
    let source = dataset(&[(1100, "A"), (2100, "B"), (1100, "C"), (3100, "D"), (2100, "E")]);
    let presenter = TrackPresenter::default();

    let colors = presenter.color_map(&source);
    let ids: Vec<i64> = colors.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![1100, 2100, 3100]);
    assert_eq!(colors, presenter.color_map(&source));

    let presentation = presenter.present(&Reprojector::british_national_grid().unwrap(), &source);
    assert_eq!(presentation.tracks[0].style.color, presentation.tracks[2].style.color);
    assert_eq!(presentation.tracks[1].style.color, presentation.tracks[4].style.color);
}

#[test]
fn thirteenth_track_wraps_to_first_color() {
    let tracks: Vec<(i64, &str)> = (1..=13).map(|i| (i * 10, "W")).collect();
    let source = dataset(&tracks);

    let colors = TrackPresenter::default().color_map(&source);

    assert_eq!(colors.len(), 13);
    assert_eq!(colors.get(130), Some(DEFAULT_PALETTE[0]));
    assert_eq!(colors.get(10), Some(Rgb::new(0xE6, 0x9F, 0x00)));
}

#[test]
fn oddly_typed_properties_stay_local() {
    let source = FeatureCollection::from_str(
        r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature",
                  "geometry": { "type": "LineString", "coordinates": [[530000, 180000], [531000, 181000]] },
                  "properties": { "TRACK_ID": 1100, "ELR": "ABC1" } },
                { "type": "Feature",
                  "geometry": { "type": "LineString", "coordinates": [[532000, 180000], [533000, 181000]] },
                  "properties": { "TRACK_ID": "UNK", "ELR": 17 } },
                { "type": "Feature",
                  "geometry": { "type": "LineString", "coordinates": [[534000, 180000], [535000, 181000]] },
                  "properties": { "TRACK_ID": 2100, "ELR": "DEF2" } }
            ]
        }"#,
    )
    .unwrap();

    let presentation = TrackPresenter::default()
        .present(&Reprojector::british_national_grid().unwrap(), &source);

    assert!(presentation.errors.is_empty());
    assert_eq!(presentation.colors.len(), 2);
    assert_eq!(presentation.tracks[0].style.color, DEFAULT_PALETTE[0]);
    assert_eq!(presentation.tracks[2].style.color, DEFAULT_PALETTE[1]);
    assert_eq!(presentation.tracks[1].style.color.to_string(), "#3388FF");
    assert_eq!(presentation.tracks[1].label, "  \n17");
    assert_eq!(presentation.drawn_coord_count(), 6);
}

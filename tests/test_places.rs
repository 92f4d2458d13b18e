use moodfood::domain::places::{
    build_query, normalize_document, normalize_response, trailing_category, PlaceDocument,
    PlaceSearchResponse, DEFAULT_CATEGORY,
};
use moodfood::{PriceRange, Restaurant, RestaurantId};
use serde_json::json;

fn doc(id: Option<&str>, name: &str) -> PlaceDocument {
    PlaceDocument {
        id: id.map(str::to_string),
        place_name: Some(name.to_string()),
        ..Default::default()
    }
}

#[test]
fn category_keeps_trailing_segment() {
    assert_eq!(trailing_category(Some("음식점 > 한식 > 국밥")), "국밥");
    assert_eq!(trailing_category(Some("일식")), "일식");
    assert_eq!(trailing_category(None), DEFAULT_CATEGORY);
    assert_eq!(trailing_category(Some("  ")), DEFAULT_CATEGORY);
}

#[test]
fn query_gets_category_or_generic_suffix() {
    assert_eq!(build_query("강남역", Some("일식")), "강남역 일식");
    assert_eq!(build_query("강남역", None), "강남역 맛집");
    assert_eq!(build_query(" 강남역 ", Some(" ")), "강남역 맛집");
}

#[test]
fn missing_ids_become_positional() {
    let response = PlaceSearchResponse {
        documents: vec![
            doc(Some("26338954"), "Numeric"),
            doc(None, "First missing"),
            doc(Some(""), "Second missing"),
        ],
    };
    let restaurants = normalize_response(response, "gangnam");

    assert_eq!(restaurants[0].id, RestaurantId::Numeric(26338954));
    assert_eq!(restaurants[1].id, RestaurantId::Synthetic("ext_1".to_string()));
    assert_eq!(restaurants[2].id, RestaurantId::Synthetic("ext_2".to_string()));
    assert!(restaurants[1].id.is_synthetic());
    assert!(restaurants.iter().all(|r| r.region == "gangnam"));
}

#[test]
fn road_address_wins_over_lot_address() {
    let mut document = doc(Some("1"), "Both");
    document.address_name = Some("서울 강남구 역삼동 1".to_string());
    document.road_address_name = Some("서울 강남구 테헤란로 1".to_string());
    assert_eq!(normalize_document(document, 0, "r").address, "서울 강남구 테헤란로 1");

    let mut document = doc(Some("2"), "Lot only");
    document.address_name = Some("서울 강남구 역삼동 2".to_string());
    document.road_address_name = Some("".to_string());
    assert_eq!(normalize_document(document, 0, "r").address, "서울 강남구 역삼동 2");
}

#[test]
fn provider_gaps_get_defaults() {
    let restaurant = normalize_document(doc(Some("3"), "Sparse"), 0, "r");
    assert_eq!(restaurant.category, DEFAULT_CATEGORY);
    assert_eq!(restaurant.rating, 0.0);
    assert_eq!(restaurant.price_range, PriceRange::Medium);
    assert_eq!(restaurant.x, None);
    assert!(restaurant.image_url.is_none());
}

#[test]
fn provider_payload_decodes() {
    let payload = json!({
        "documents": [{
            "id": "8",
            "place_name": "Gukbap House",
            "category_name": "음식점 > 한식 > 국밥",
            "road_address_name": "서울 마포구 1",
            "phone": "02-000-0000",
            "place_url": "http://place.map.kakao.com/8",
            "x": "126.9",
            "y": "37.55"
        }],
        "meta": { "total_count": 1 }
    });
    let response: PlaceSearchResponse = serde_json::from_value(payload).unwrap();
    let restaurants = normalize_response(response, "mapo");

    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].category, "국밥");
    assert_eq!(restaurants[0].x, Some(126.9));
    assert_eq!(restaurants[0].y, Some(37.55));
    assert_eq!(restaurants[0].place_url, "http://place.map.kakao.com/8");
}

#[test]
fn listing_records_accept_loose_shapes() {
    let restaurant: Restaurant = serde_json::from_value(json!({
        "id": "12",
        "name": "Loose",
        "x": "127.01",
        "y": 37.4,
        "externalPlaceUrl": "http://example.com/12"
    }))
    .unwrap();

    assert_eq!(restaurant.id, RestaurantId::Numeric(12));
    assert_eq!(restaurant.x, Some(127.01));
    assert_eq!(restaurant.y, Some(37.4));
    assert_eq!(restaurant.place_url, "http://example.com/12");
    assert_eq!(restaurant.render_key(), "12-Loose-");
}

#[test]
fn default_image_is_filled_only_when_missing() {
    let base = normalize_document(doc(Some("5"), "Pic"), 0, "r");
    let filled = base.clone().with_default_image();
    assert_eq!(filled.image_url_or_placeholder(), base.image_url_or_placeholder());

    let mut own = base;
    own.image_url = Some("http://img/own.png".to_string());
    assert_eq!(own.with_default_image().image_url.as_deref(), Some("http://img/own.png"));
}

//! External map links for collection points.

use crate::{GeoCoordinate, GeoError, LocationState, Result};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";
const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// "View on map" link for a coordinate.
pub fn view_on_map_url(at: &GeoCoordinate) -> String {
    format!("{MAPS_SEARCH_URL}{},{}", at.latitude(), at.longitude())
}

/// Directions link between two coordinates.
pub fn directions_url(from: &GeoCoordinate, to: &GeoCoordinate) -> String {
    format!(
        "{MAPS_DIRECTIONS_URL}{},{}/{},{}",
        from.latitude(),
        from.longitude(),
        to.latitude(),
        to.longitude()
    )
}

/// Directions from the user's acquired location.
///
/// # Errors
/// [`GeoError::LocationRequired`] unless the state holds a coordinate.
pub fn directions_from_state(state: &LocationState, to: &GeoCoordinate) -> Result<String> {
    state
        .reference()
        .map(|from| directions_url(&from, to))
        .ok_or(GeoError::LocationRequired)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_on_map() {
        let at = GeoCoordinate::new(-23.5505, -46.6833).unwrap();
        assert_eq!(
            view_on_map_url(&at),
            "https://www.google.com/maps/search/?api=1&query=-23.5505,-46.6833"
        );
    }

    #[test]
    fn test_directions() {
        let from = GeoCoordinate::new(-23.5489, -46.6388).unwrap();
        let to = GeoCoordinate::new(-23.5505, -46.6794).unwrap();
        assert_eq!(
            directions_url(&from, &to),
            "https://www.google.com/maps/dir/-23.5489,-46.6388/-23.5505,-46.6794"
        );
    }

    #[test]
    fn test_directions_need_location() {
        let to = GeoCoordinate::new(0.0, 0.0).unwrap();
        assert!(matches!(
            directions_from_state(&LocationState::Unknown, &to),
            Err(GeoError::LocationRequired)
        ));
        assert!(directions_from_state(&LocationState::Denied("no".into()), &to).is_err());

        let here = GeoCoordinate::new(1.0, 2.0).unwrap();
        let url = directions_from_state(&LocationState::Acquired(here), &to).unwrap();
        assert_eq!(url, "https://www.google.com/maps/dir/1,2/0,0");
    }
}

use super::*;

fn guest(id: &str, first: &str, last: &str, attending: bool) -> Guest {
    Guest {
        id: GuestId::from(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        attending,
    }
}

#[test]
fn new_state_is_empty_and_loading() {
    let state = DirectoryState::new();
    assert!(state.guests.is_empty());
    assert!(state.draft.is_empty());
    assert_eq!(state.load_state, LoadState::Loading);
    assert!(!state.is_ready());
}

#[test]
fn absorb_listing_keeps_store_order_and_becomes_ready() {
    let mut state = DirectoryState::new();
    let listing = vec![
        guest("3", "Grace", "Hopper", true),
        guest("1", "Ada", "Lovelace", false),
        guest("2", "Alan", "Turing", false),
    ];

    state.absorb_listing(listing.clone());

    assert_eq!(state.guests, listing);
    assert!(state.is_ready());
}

#[test]
fn absorb_created_prepends_and_clears_draft() {
    let mut state = DirectoryState::new();
    state.absorb_listing(vec![guest("1", "Ada", "Lovelace", false)]);
    state.draft.first_name = "Grace".to_string();
    state.draft.last_name = "Hopper".to_string();

    state.absorb_created(guest("2", "Grace", "Hopper", false));

    assert_eq!(state.guests[0].id, GuestId::from("2"));
    assert_eq!(state.guests[1].id, GuestId::from("1"));
    assert!(state.draft.is_empty());
}

#[test]
fn absorb_confirmed_touches_only_the_matching_entry() {
    let mut state = DirectoryState::new();
    state.absorb_listing(vec![
        guest("1", "Ada", "Lovelace", false),
        guest("2", "Alan", "Turing", false),
    ]);

    let applied = state.absorb_confirmed(&guest("2", "Alan", "Turing", true));

    assert!(applied);
    assert!(!state.guests[0].attending);
    assert!(state.guests[1].attending);
    assert_eq!(state.guests.len(), 2);
}

#[test]
fn absorb_confirmed_never_rewrites_names() {
    // Attendance is the only field mutated in place, even when the
    // confirmed record carries different names.
    let mut state = DirectoryState::new();
    state.absorb_listing(vec![guest("1", "Ada", "Lovelace", false)]);

    let applied = state.absorb_confirmed(&guest("1", "Augusta", "King", true));

    assert!(applied);
    assert_eq!(state.guests[0].first_name, "Ada");
    assert_eq!(state.guests[0].last_name, "Lovelace");
    assert!(state.guests[0].attending);
}

#[test]
fn absorb_confirmed_reports_unknown_id() {
    let mut state = DirectoryState::new();
    state.absorb_listing(vec![guest("1", "Ada", "Lovelace", false)]);

    assert!(!state.absorb_confirmed(&guest("9", "Nobody", "Here", true)));
    assert!(!state.guests[0].attending);
}

#[test]
fn absorb_removed_takes_out_exactly_one_entry() {
    let mut state = DirectoryState::new();
    state.absorb_listing(vec![
        guest("1", "Ada", "Lovelace", false),
        guest("2", "Alan", "Turing", true),
    ]);

    let removed = state.absorb_removed(&GuestId::from("2")).expect("removed");
    assert_eq!(removed.first_name, "Alan");
    assert_eq!(state.guests.len(), 1);

    // Second removal of the same id finds nothing and must not panic.
    assert!(state.absorb_removed(&GuestId::from("2")).is_none());
    assert_eq!(state.guests.len(), 1);
}

#[test]
fn submittable_requires_both_names_non_blank() {
    assert!(Draft::submittable("Ada", "Lovelace"));
    assert!(!Draft::submittable("", "Lovelace"));
    assert!(!Draft::submittable("Ada", ""));
    assert!(!Draft::submittable("   ", "Lovelace"));
    assert!(!Draft::submittable("Ada", "\t"));
    assert!(!Draft::submittable("", ""));
}

#[test]
fn clear_draft_resets_both_fields() {
    let mut draft = Draft {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    };
    draft.clear();
    assert!(draft.is_empty());
}

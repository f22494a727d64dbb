//! Resolution behaviour of the default site table.

use std::collections::BTreeMap;
use std::sync::Arc;

use urlconf::config::SiteConfig;
use urlconf::http::SiteRoutes;
use urlconf::routing::{Binding, Hop, ParamValue, RouteError, RouteTable};
use urlconf::build_site;

fn default_site() -> Arc<SiteRoutes> {
    build_site(&SiteConfig::default().routes).unwrap()
}

#[test]
fn test_admin_root() {
    let site = default_site();
    let res = site.resolve("admin/").unwrap();
    assert_eq!(res.endpoint.name(), "admin");
    assert_eq!(res.remainder, "");
    assert_eq!(res.name.as_deref(), Some("admin"));
}

#[test]
fn test_admin_sub_path() {
    let site = default_site();
    let res = site.resolve("admin/login/").unwrap();
    assert_eq!(res.endpoint.name(), "admin");
    assert_eq!(res.remainder, "login/");
}

#[test]
fn test_polls_root() {
    let site = default_site();
    let res = site.resolve("polls/").unwrap();
    assert_eq!(res.endpoint.name(), "polls.index");
    assert_eq!(
        res.hops,
        vec![Hop {
            prefix: "polls/".into(),
            forwarded: "".into()
        }]
    );
    assert_eq!(res.name.as_deref(), Some("polls:index"));
}

#[test]
fn test_polls_vote() {
    let site = default_site();
    let res = site.resolve("polls/3/vote/").unwrap();
    assert_eq!(res.endpoint.name(), "polls.vote");
    assert_eq!(res.hops[0].forwarded, "3/vote/");
    assert_eq!(res.params.get("question_id"), Some(&ParamValue::Int(3)));
}

#[test]
fn test_unknown_path() {
    let site = default_site();
    for path in ["unknown/", "", "admin", "pollsx/", "polls/abc/", "polls/3/vote/again/"] {
        assert!(
            matches!(site.resolve(path), Err(RouteError::NoMatch { .. })),
            "expected no match for {path:?}"
        );
    }
}

#[test]
fn test_every_admin_path_keeps_remainder() {
    let site = default_site();
    for rest in ["", "login/", "auth/user/1/change/", "a/b"] {
        let path = format!("admin/{rest}");
        let res = site.resolve(&path).unwrap();
        assert_eq!(res.endpoint.name(), "admin");
        assert_eq!(res.remainder, rest);
    }
}

#[test]
fn test_resolution_is_repeatable() {
    let site = default_site();
    for path in ["admin/x/", "polls/12/results/", "polls/"] {
        let a = site.resolve(path).unwrap();
        let b = site.resolve(path).unwrap();
        assert_eq!(a.endpoint.name(), b.endpoint.name());
        assert_eq!(a.remainder, b.remainder);
        assert_eq!(a.params, b.params);
        assert_eq!(a.hops, b.hops);
    }
}

#[test]
fn test_overlapping_prefixes_earlier_wins() {
    let table = RouteTable::new(vec![
        Binding::mount("polls/", "catch-all").unwrap(),
        Binding::mount("polls/3/", "specific").unwrap(),
    ]);
    assert_eq!(*table.resolve("polls/3/vote/").unwrap().endpoint, "catch-all");
}

#[test]
fn test_reverse_round_trip() {
    let site = default_site();
    let mut params = BTreeMap::new();
    params.insert("question_id".to_string(), "12".to_string());

    let path = site.reverse("polls:results", &params).unwrap();
    assert_eq!(path, "polls/12/results/");

    let res = site.resolve(&path).unwrap();
    assert_eq!(res.name.as_deref(), Some("polls:results"));
}

#[test]
fn test_shared_across_threads() {
    let site = default_site();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let site = site.clone();
            std::thread::spawn(move || {
                let path = format!("polls/{i}/");
                let name = site.resolve(&path).unwrap().endpoint.name();
                name
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "polls.detail");
    }
}

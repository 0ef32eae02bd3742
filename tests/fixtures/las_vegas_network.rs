//! Las Vegas delivery network fixture.
//!
//! Coordinates are approximate real locations. Distances and drive times
//! are rounded road figures; costs are per-segment fuel and toll estimates.

use route_planner::graph::{Edge, Graph, Node, NodeKind};

pub const DC_HENDERSON: &str = "dc-henderson";
pub const AIRPORT: &str = "geo-airport";
pub const HUB_STRIP: &str = "hub-strip";
pub const HUB_SUMMERLIN: &str = "hub-summerlin";
pub const HUB_NORTHEAST: &str = "hub-northeast";
pub const ADDR_WYNN: &str = "addr-wynn";
pub const ADDR_MGM: &str = "addr-mgm";
pub const ADDR_RED_ROCK: &str = "addr-red-rock";
pub const ADDR_NELLIS: &str = "addr-nellis";

/// One road segment: (from, to, km, minutes, cost).
type Segment = (&'static str, &'static str, f64, f64, f64);

/// Segments driveable in both directions.
const TWO_WAY: &[Segment] = &[
    (DC_HENDERSON, AIRPORT, 17.5, 18.0, 9.0),
    (AIRPORT, HUB_STRIP, 4.5, 9.0, 3.0),
    (DC_HENDERSON, HUB_NORTHEAST, 24.0, 22.0, 11.0),
    (HUB_NORTHEAST, HUB_STRIP, 13.0, 20.0, 5.0),
    (HUB_STRIP, ADDR_WYNN, 1.8, 6.0, 2.0),
    (HUB_STRIP, ADDR_MGM, 1.4, 5.0, 2.0),
    (HUB_STRIP, HUB_SUMMERLIN, 17.0, 21.0, 8.0),
    (HUB_SUMMERLIN, ADDR_RED_ROCK, 2.6, 5.0, 2.5),
    (HUB_NORTHEAST, ADDR_NELLIS, 8.0, 10.0, 4.0),
];

/// Toll beltway, outbound only.
const ONE_WAY: &[Segment] = &[(DC_HENDERSON, HUB_SUMMERLIN, 44.0, 30.0, 25.0)];

pub fn edge_id(from: &str, to: &str) -> String {
    format!("{from}>{to}")
}

pub fn nodes() -> Vec<Node> {
    vec![
        Node::new(DC_HENDERSON, NodeKind::Facility)
            .named("Henderson Distribution Center")
            .at(36.0395, -114.9817),
        Node::new(AIRPORT, NodeKind::Geo)
            .named("Harry Reid Airport Interchange")
            .at(36.0840, -115.1537),
        Node::new(HUB_STRIP, NodeKind::Hub)
            .named("Strip Hub")
            .at(36.1147, -115.1728),
        Node::new(HUB_SUMMERLIN, NodeKind::Hub)
            .named("Summerlin Hub")
            .at(36.1699, -115.3260),
        Node::new(HUB_NORTHEAST, NodeKind::Hub)
            .named("Northeast Hub")
            .at(36.1990, -115.0990),
        Node::new(ADDR_WYNN, NodeKind::Address)
            .named("Wynn Las Vegas")
            .at(36.1264, -115.1658),
        Node::new(ADDR_MGM, NodeKind::Address)
            .named("MGM Grand")
            .at(36.1024, -115.1689),
        Node::new(ADDR_RED_ROCK, NodeKind::Address)
            .named("Red Rock Casino")
            .at(36.1590, -115.3346),
        Node::new(ADDR_NELLIS, NodeKind::Address)
            .named("Nellis Gate")
            .at(36.2360, -115.0340),
    ]
}

pub fn edges() -> Vec<Edge> {
    let segment = |&(from, to, km, minutes, cost): &Segment| {
        Edge::new(edge_id(from, to), from, to, km)
            .with_duration(minutes)
            .with_cost(cost)
    };

    let mut edges = Vec::new();
    for seg in TWO_WAY {
        edges.push(segment(seg));
        let (from, to, km, minutes, cost) = *seg;
        edges.push(segment(&(to, from, km, minutes, cost)));
    }
    edges.extend(ONE_WAY.iter().map(segment));
    edges
}

pub fn las_vegas_network() -> Graph {
    Graph::new(nodes(), edges())
}

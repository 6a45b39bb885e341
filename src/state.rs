/// Resolution state of one distinct image reference on a wall.
#[derive(Debug, PartialEq)]
pub enum TileState<H> {
    Pending,                         // Not resolved yet, the tile shows its empty frame
    Ready { handle: H, since: f64 }, // Resolved at wall time `since`, fades in from there
    Hidden,                          // Failed to resolve, stays hidden for the wall's lifetime
}

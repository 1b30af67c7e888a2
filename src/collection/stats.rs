/// Human-readable record count for the collection header.
pub fn stats_text(total: usize, filtered: usize) -> String {
    let noun = if total == 1 { "record" } else { "records" };
    if filtered == total {
        format!("{} {}", total, noun)
    } else {
        format!("Showing {} of {} {}", filtered, total, noun)
    }
}

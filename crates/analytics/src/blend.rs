use core_types::SeriesPoint;

/// Splices a longer-history proxy onto the front of `primary`.
///
/// Proxy points dated strictly before the first primary point are rescaled so
/// that the last of them meets `primary[0]` at the splice, then the primary
/// history follows unchanged. A proxy point dated exactly on the primary
/// start is dropped; no other de-duplication is done, so the proxy must only
/// contribute genuinely earlier dates.
///
/// - empty `primary`: the proxy is returned as-is.
/// - no proxy history before the primary start: `primary` is returned as-is.
pub fn blend(primary: &[SeriesPoint], proxy: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let Some(first) = primary.first() else {
        return proxy.to_vec();
    };

    let proxy_before: Vec<&SeriesPoint> =
        proxy.iter().filter(|p| p.date < first.date).collect();
    let Some(splice) = proxy_before.last() else {
        return primary.to_vec();
    };

    let scale = first.value / splice.value;

    let mut blended = Vec::with_capacity(proxy_before.len() + primary.len());
    blended.extend(
        proxy_before
            .iter()
            .map(|p| SeriesPoint::new(p.date, p.value * scale)),
    );
    blended.extend_from_slice(primary);
    blended
}

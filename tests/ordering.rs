use anyhow::Result;

use docversions::VersionId;

fn ids(raw: &[&str]) -> Result<Vec<VersionId>> {
    raw.iter().map(|s| Ok(VersionId::parse(s)?)).collect()
}

#[test]
fn numeric_not_lexicographic() -> Result<()> {
    let mut v = ids(&["v5.9.0", "v5.10.0", "v5.9.9"])?;
    v.sort_by(|a, b| b.cmp(a));
    let got: Vec<&str> = v.iter().map(|v| v.as_str()).collect();
    assert_eq!(got, vec!["v5.10.0", "v5.9.9", "v5.9.0"]);
    Ok(())
}

#[test]
fn release_above_prerelease() -> Result<()> {
    let mut v = ids(&["v2.0.0-rc1", "v2.0.0", "v1.9.9", "v2.0.0-beta"])?;
    v.sort();
    let got: Vec<&str> = v.iter().map(|v| v.as_str()).collect();
    assert_eq!(got, vec!["v1.9.9", "v2.0.0-beta", "v2.0.0-rc1", "v2.0.0"]);
    Ok(())
}

// Случайные тройки: порядок должен совпадать с порядком числовых кортежей.
#[test]
fn random_triples_sort_like_tuples() -> Result<()> {
    let mut rng = oorandom::Rand32::new(0x5eed_d0c5);
    let mut triples: Vec<(u32, u32, u32)> = (0..300)
        .map(|_| (rng.rand_range(0..12), rng.rand_range(0..25), rng.rand_range(0..120)))
        .collect();
    triples.sort();
    triples.dedup();

    let mut shuffled = triples.clone();
    for i in (1..shuffled.len()).rev() {
        let j = rng.rand_range(0..(i as u32 + 1)) as usize;
        shuffled.swap(i, j);
    }
    let mut versions = shuffled
        .iter()
        .map(|(a, b, c)| VersionId::parse(&format!("v{a}.{b}.{c}")))
        .collect::<docversions::Result<Vec<_>>>()?;
    versions.sort();

    let expected: Vec<String> = triples
        .iter()
        .map(|(a, b, c)| format!("v{a}.{b}.{c}"))
        .collect();
    let got: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
    assert_eq!(got, expected);
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const HEADER: [&str; 13] = [
    "カードID",
    "カード名",
    "色",
    "タイプ",
    "コスト",
    "カウンター",
    "属性",
    "特徴",
    "テキスト",
    "トリガー",
    "ブロックアイコン",
    "入手情報",
    "画像URL",
];

const COLORS: [&str; 6] = ["赤", "緑", "青", "紫", "黒", "黄"];
const ATTRIBUTES: [&str; 5] = ["打", "斬", "特", "射", "知"];
const FEATURES: [&str; 6] = [
    "麦わらの一味",
    "超新星",
    "海軍",
    "王下七武海",
    "四皇",
    "ハートの海賊団",
];
const TRIGGERS: [&str; 3] = ["【トリガー】カード1枚を引く。", "【トリガー】このカードを登場させる。", ""];
const SERIES: [(&str, &str); 4] = [
    ("OP01", "ブースターパック ROMANCE DAWN【OP-01】"),
    ("OP02", "ブースターパック 頂上決戦【OP-02】"),
    ("ST01", "スタートデッキ 麦わらの一味【ST-01】"),
    ("P", "プロモーションカード"),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

struct SampleCard {
    id: String,
    name: String,
    color: String,
    card_type: &'static str,
    cost: String,
    counter: String,
    attribute: String,
    features: String,
    text: String,
    trigger: String,
    block: String,
    info: String,
}

impl SampleCard {
    fn record(&self, image_url: &str) -> [String; 13] {
        [
            self.id.clone(),
            self.name.clone(),
            self.color.clone(),
            self.card_type.to_string(),
            self.cost.clone(),
            self.counter.clone(),
            self.attribute.clone(),
            self.features.clone(),
            self.text.clone(),
            self.trigger.clone(),
            self.block.clone(),
            self.info.clone(),
            image_url.to_string(),
        ]
    }
}

fn generate_card(rng: &mut SimpleRng, prefix: &str, info: &str, number: usize) -> SampleCard {
    let card_type = match number {
        1 => "LEADER",
        n if n % 7 == 0 => "EVENT",
        n if n % 11 == 0 => "STAGE",
        _ => "CHARACTER",
    };

    let mut color = rng.pick(&COLORS).to_string();
    if card_type == "LEADER" && rng.below(3) == 0 {
        let second = rng.pick(&COLORS);
        if second != color {
            color = format!("{color}/{second}");
        }
    }

    let features = if rng.below(4) == 0 {
        format!("{}／{}", rng.pick(&FEATURES), rng.pick(&FEATURES))
    } else {
        rng.pick(&FEATURES).to_string()
    };

    let (cost, counter, attribute) = match card_type {
        "LEADER" => ("-".to_string(), "-".to_string(), rng.pick(&ATTRIBUTES).to_string()),
        "CHARACTER" => (
            (1 + rng.below(9)).to_string(),
            ["-", "1000", "2000"][rng.below(3)].to_string(),
            rng.pick(&ATTRIBUTES).to_string(),
        ),
        _ => ((rng.below(6)).to_string(), "-".to_string(), "-".to_string()),
    };

    SampleCard {
        id: format!("{prefix}-{number:03}"),
        name: format!("サンプルカード {prefix}-{number:03}"),
        color,
        card_type,
        cost,
        counter,
        attribute,
        features,
        text: format!("【登場時】カード{}枚を引く。", 1 + rng.below(2)),
        trigger: rng.pick(&TRIGGERS).to_string(),
        block: (1 + rng.below(3)).to_string(),
        info: info.to_string(),
    }
}

fn write_csv(path: &Path, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let mut official = Vec::new();
    for (prefix, info) in &SERIES[..3] {
        for number in 1..=24 {
            official.push(generate_card(&mut rng, prefix, info, number));
        }
    }

    let custom: Vec<SampleCard> = (1..=5)
        .map(|n| generate_card(&mut rng, "CUSTOM", "-", n + 1))
        .collect();

    // Parallel printings reuse the official ids; every fourth one is a promo.
    let parallel: Vec<&SampleCard> = official.iter().step_by(4).collect();

    let image = |card: &SampleCard, suffix: &str| {
        format!("https://example.com/images/{}{suffix}.png", card.id)
    };

    let official_rows: Vec<Vec<String>> = official
        .iter()
        .map(|c| c.record(&image(c, "")).to_vec())
        .collect();
    write_csv(&out_dir.join("cardlist_filtered.csv"), &HEADER, &official_rows)?;

    let custom_rows: Vec<Vec<String>> = custom
        .iter()
        .map(|c| c.record(&image(c, "")).to_vec())
        .collect();
    write_csv(&out_dir.join("custom_cards.csv"), &HEADER, &custom_rows)?;

    let parallel_rows: Vec<Vec<String>> = parallel
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mut row = c.record(&image(c, "_p1"));
            if i % 4 == 3 {
                row[11] = SERIES[3].1.to_string();
            }
            row.to_vec()
        })
        .collect();
    write_csv(&out_dir.join("cardlist_p_only.csv"), &HEADER, &parallel_rows)?;

    println!(
        "Wrote {} official, {} custom and {} parallel cards to {}",
        official_rows.len(),
        custom_rows.len(),
        parallel_rows.len(),
        out_dir.display()
    );
    Ok(())
}

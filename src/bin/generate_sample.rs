use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

const QUESTIONS: &[(&str, &str)] = &[
    ("Q1", "診断時に十分な説明を受けた"),
    ("Q2", "治療方針の決定に参加できた"),
    ("Q3", "入院中の学習支援を利用した"),
    ("Q4", "きょうだいへの支援があった"),
    ("Q5", "経済的な負担を感じた"),
    ("Q6", "相談支援センターを知っていた"),
    ("Q7", "晩期合併症について説明を受けた"),
    ("Q8", "復学時に学校との連携があった"),
    ("Q9", "長期フォローアップ外来を受診している"),
    ("Q10", "患者会・家族会に参加した"),
];

/// Relative offset of each patient group from the overall rate.
const GROUP_SHIFT: [f64; 3] = [4.0, -3.0, -9.0];

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform value in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

fn percentage(v: f64) -> String {
    format!("{:.1}", v.clamp(0.0, 100.0))
}

fn write_survey(path: &Path, rng: &mut SimpleRng) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    // Spreadsheet exports start with a BOM.
    file.write_all("\u{feff}".as_bytes())?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([
        "問番号",
        "設問内容の要約",
        "全体 (%)",
        "造血器腫瘍 (%)",
        "固形腫瘍 (脳腫瘍を除く) (%)",
        "脳腫瘍 (%)",
    ])?;

    for &(id, summary) in QUESTIONS {
        let overall = rng.uniform(15.0, 85.0);
        let groups: Vec<String> = GROUP_SHIFT
            .iter()
            .map(|shift| percentage(overall + shift + rng.uniform(-8.0, 8.0)))
            .collect();
        writer.write_record([
            id.to_string(),
            summary.to_string(),
            percentage(overall),
            groups[0].clone(),
            groups[1].clone(),
            groups[2].clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    write_survey(Path::new("Book1.csv"), &mut rng)?;
    std::fs::write(
        "overview.txt",
        "小児がん経験者とその家族を対象としたアンケート調査の集計結果です。\n\
         各設問について「はい」と回答した割合を、全体および疾患群別に示しています。\n",
    )
    .context("writing overview.txt")?;
    std::fs::write(
        "notes.txt",
        "・割合は各群の有効回答数を分母として算出しています。\n\
         ・固形腫瘍には脳腫瘍を含みません。\n\
         ・無回答は集計から除外しています。\n",
    )
    .context("writing notes.txt")?;

    println!(
        "Wrote {} questions to Book1.csv, plus overview.txt and notes.txt",
        QUESTIONS.len()
    );
    Ok(())
}

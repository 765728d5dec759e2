use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

/// 결과를 `<prefix>_<name>.json` 으로 저장하고 파일 경로를 돌려준다.
pub fn save_json<T: Serialize + ?Sized>(
    value: &T,
    output_prefix: &str,
    name: &str,
) -> Result<String, Box<dyn Error>> {
    let filename = format!("{}_{}.json", output_prefix, name);
    let file = File::create(&filename)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CpuPolicy, Process, SchedulingResult};
    use crate::processors::cpu;
    use std::fs;

    #[test]
    fn test_save_json_can_be_read_back() {
        let processes = vec![Process::new("P1", 0, 4, 1), Process::new("P2", 1, 2, 0)];
        let result = cpu::schedule(&processes, CpuPolicy::PriorityPreemptive).unwrap();

        let dir = std::env::temp_dir().join(format!("ossim_json_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let prefix = dir.join("run").to_string_lossy().into_owned();

        let path = save_json(&result, &prefix, "cpu").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let loaded: SchedulingResult = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.timeline, result.timeline);
        assert_eq!(loaded.processes, result.processes);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["processes"][0]["id"], "P1");
        assert_eq!(value["timeline"][0]["occupant"]["kind"], "process");
    }
}

use std::time::Duration;

// 실행 옵션을 저장할 구조체 정의
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output_prefix: Option<String>, // 결과 파일 접두사 (없으면 콘솔만)
    pub export_csv: bool,
    pub export_json: bool,
    pub export_chart: bool,
    pub step_delay: Option<Duration>, // 디스크 탐색 단계별 재생 간격
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            output_prefix: None,
            export_csv: false,
            export_json: false,
            export_chart: false,
            step_delay: None,
        }
    }
}

impl RunConfig {
    // 파일 출력이 하나라도 요청되었는지 확인
    pub fn wants_files(&self) -> bool {
        self.export_csv || self.export_json || self.export_chart
    }

    /// 파일 출력에 쓸 접두사. 지정하지 않았으면 서브커맨드 이름을 쓴다.
    pub fn prefix_or(&self, fallback: &str) -> String {
        self.output_prefix
            .clone()
            .unwrap_or_else(|| format!("ossim_{fallback}"))
    }

    /// 공통 옵션 하나를 소비한다. 처리했으면 소비한 인자 수를 반환.
    pub fn consume_option(&mut self, args: &[String], i: usize) -> Result<Option<usize>, String> {
        match args[i].as_str() {
            "-o" | "--output" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} option requires a prefix", args[i]))?;
                self.output_prefix = Some(value.clone());
                Ok(Some(2))
            }
            "--csv" => {
                self.export_csv = true;
                Ok(Some(1))
            }
            "--json" => {
                self.export_json = true;
                Ok(Some(1))
            }
            "--chart" => {
                self.export_chart = true;
                Ok(Some(1))
            }
            "--step" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| "--step option requires a delay in ms".to_string())?;
                let ms = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid step delay: {value}"))?;
                self.step_delay = Some(Duration::from_millis(ms));
                Ok(Some(2))
            }
            _ => Ok(None),
        }
    }
}

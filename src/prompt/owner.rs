use super::{PromptBuilder, PromptInput};

/// Prompt asking for operator-facing recommendations
pub fn owner_prompt(input: &PromptInput<'_>) -> String {
    let task = format!("'{}' 매장의 고객 리뷰를 바탕으로 운영 개선안 도출", input.name);

    PromptBuilder::new()
        .role("외식업 경영 컨설턴트", &task)
        .objectives(vec![
            "리뷰에서 드러난 매장의 강점과 약점을 요약하세요",
            "측면(맛, 서비스, 가격, 분위기, 위생)별로 개선이 필요한 지점을 짚으세요",
            "사장님이 바로 실행할 수 있는 개선 방안 3가지를 우선순위와 함께 제시하세요",
            "긍정 리뷰에서 유지해야 할 요소를 알려주세요",
        ])
        .focus(
            input.name,
            vec![
                "다른 식당과 비교하지 마세요",
                "아래 데이터에 없는 사실을 지어내지 마세요",
            ],
        )
        .facts("리뷰 통계", input.statistics())
        .list("측면별 요약", input.aspect_lines())
        .list("측면별 키워드", input.keyword_lines())
        .list("대표 긍정 리뷰", input.exemplar_lines(input.top_positive))
        .list("대표 부정 리뷰", input.exemplar_lines(input.top_negative))
        .section(
            "지표 설명",
            "긍정/부정 비율은 긍정 또는 부정으로 분류된 리뷰만을 기준으로 계산되었습니다. \
             키워드 옆 숫자는 해당 측면에서의 중요도 점수입니다.",
        )
        .output_format(vec![
            "한국어로 작성하세요",
            "마크다운 제목과 글머리표를 사용하세요",
            "개선 방안마다 근거가 된 리뷰 내용을 함께 적으세요",
        ])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::tests::sample_analysis;

    #[test]
    fn test_owner_prompt_framing() {
        let analysis = sample_analysis();
        let prompt = owner_prompt(&PromptInput::from_analysis("버거킹 연세로점", &analysis, 200));

        assert!(!prompt.is_empty());
        assert!(prompt.starts_with("<ROLE>"));
        assert!(prompt.contains("외식업 경영 컨설턴트"));
        assert!(prompt.contains("'버거킹 연세로점' 매장"));
        assert!(prompt.contains("개선 방안 3가지"));
        assert!(prompt.contains("## 측면별 키워드"));
    }
}

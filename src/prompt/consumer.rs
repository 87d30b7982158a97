use super::{PromptBuilder, PromptInput};

/// Prompt helping a prospective customer decide whether to visit
pub fn consumer_prompt(input: &PromptInput<'_>) -> String {
    let task = format!("'{}' 방문을 고민하는 손님을 위한 리뷰 요약", input.name);

    PromptBuilder::new()
        .role("맛집 가이드", &task)
        .objectives(vec![
            "이 식당을 방문할 만한지 한 문장으로 결론을 내려주세요",
            "손님들이 공통으로 칭찬한 점과 불만을 정리하세요",
            "리뷰에 언급된 추천 메뉴나 방문 팁이 있다면 알려주세요",
        ])
        .focus(
            input.name,
            vec![
                "다른 식당을 추천하지 마세요",
                "아래 데이터에 없는 사실을 지어내지 마세요",
            ],
        )
        .facts("리뷰 통계", input.statistics())
        .list("측면별 평가", input.aspect_lines())
        .list("자주 언급된 키워드", input.keyword_lines())
        .list("좋았다는 리뷰", input.exemplar_lines(input.top_positive))
        .list("아쉬웠다는 리뷰", input.exemplar_lines(input.top_negative))
        .output_format(vec![
            "한국어로 작성하세요",
            "친근한 말투로 짧게 작성하세요",
            "마지막 줄에 '추천', '보통', '비추천' 중 하나로 평가를 남기세요",
        ])
        .text("리뷰 수가 적다면 그 점을 함께 알려주세요.")
        .build()
}

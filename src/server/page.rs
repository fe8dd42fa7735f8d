//! HTML assembly for the dashboard page.

/// Fixed descriptive text shown under each chart.
const INSIGHT_VOLUME: &str = "Este gráfico de barras interativo em SVG revela a média do volume anual de vendas por tipo de título do Tesouro Direto. Ao passar o mouse sobre as barras, você pode visualizar os valores exatos, destacando quais títulos atraem maior investimento no período.";

const INSIGHT_SHARE: &str = "Este gráfico de linhas interativo em SVG exibe a participação percentual mensal nas vendas totais por tipo de título. Interaja com as linhas para ver os valores de cada mês e identifique tendências e sazonalidades ao longo do ano.";

const INSIGHT_COMPARISON: &str = "Este gráfico de linhas interativo em SVG compara o volume de vendas anual de títulos do Tesouro Direto com a Taxa Selic Média Anual ao longo do tempo. Observe as tendências de ambos os indicadores e como eles podem se relacionar, com eixos independentes para facilitar a visualização de suas diferentes escalas.";

/// Assemble the dashboard page around the three chart filenames.
///
/// An empty filename means "no chart available": the figure keeps its text
/// but the image is omitted.
pub fn render_index(volume_file: &str, share_file: &str, comparison_file: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>Tesouro Direto - Painel de Vendas</title>
<style>
body {{ font-family: sans-serif; background: #E8E8E8; color: #534A44; margin: 0 auto; max-width: 1020px; padding: 1rem; }}
figure {{ margin: 2rem 0; }}
figcaption {{ margin-top: 0.5rem; font-size: 0.9rem; }}
object {{ width: 100%; }}
.unavailable {{ font-style: italic; }}
</style>
</head>
<body>
<h1>Tesouro Direto - Painel de Vendas</h1>
{}
{}
{}
</body>
</html>
"#,
        figure(volume_file, INSIGHT_VOLUME),
        figure(share_file, INSIGHT_SHARE),
        figure(comparison_file, INSIGHT_COMPARISON),
    )
}

fn figure(file: &str, insight: &str) -> String {
    if file.is_empty() {
        return format!(
            "<figure><p class=\"unavailable\">Gráfico indisponível.</p><figcaption>{insight}</figcaption></figure>"
        );
    }
    format!(
        "<figure><object type=\"image/svg+xml\" data=\"/static/{file}\"></object><figcaption>{insight}</figcaption></figure>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_embeds_rendered_charts() {
        let html = render_index(
            "volume_anual.svg",
            "participacao_mensal.svg",
            "comparacao_volume_selic.svg",
        );

        assert!(html.contains("/static/volume_anual.svg"));
        assert!(html.contains("/static/participacao_mensal.svg"));
        assert!(html.contains("/static/comparacao_volume_selic.svg"));
        assert!(!html.contains("indisponível"));
    }

    #[test]
    fn page_omits_failed_charts() {
        let html = render_index("volume_anual.svg", "", "comparacao_volume_selic.svg");

        assert!(html.contains("/static/volume_anual.svg"));
        assert!(!html.contains("/static/participacao_mensal.svg"));
        assert!(html.contains("Gráfico indisponível."));
        // The descriptive text stays even when its chart is missing.
        assert!(html.contains("participação percentual mensal"));
    }
}
